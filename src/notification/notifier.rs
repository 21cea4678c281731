//! 通知器 trait 定义 - 构建中途与构建结束两种通知

use tracing::info;

use super::builder::PayloadBuilder;
use super::payload::NotificationPayload;
use super::webhook::deliver;
use crate::build::BuildFacts;
use crate::config::NotifierConfig;

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（如 dry-run）
    Skipped(String),
    /// 发送失败（已记录日志）
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

/// 构建通知器 trait
pub trait BuildNotifier: Send + Sync {
    /// 通知器名称（用于日志）
    fn name(&self) -> &str;

    /// 组装消息
    fn build_payload(&self, facts: &BuildFacts, builder: &PayloadBuilder) -> NotificationPayload;

    /// 组装并投递，永远不返回错误
    fn notify(&self, facts: &BuildFacts, config: &NotifierConfig) -> SendResult {
        let builder = PayloadBuilder::new(config.jenkins_server_url.as_str());
        let payload = self.build_payload(facts, &builder);
        let result = deliver(&config.webhook_target(), &payload);

        if result.is_sent() {
            info!(
                notifier = self.name(),
                project = %facts.project_full_name,
                build = %facts.display_name,
                "message posted to slack"
            );
        } else {
            info!(
                notifier = self.name(),
                project = %facts.project_full_name,
                build = %facts.display_name,
                result = ?result,
                "message not posted to slack"
            );
        }
        result
    }
}

/// 构建步骤通知器（构建进行中发送）
#[derive(Debug, Clone)]
pub struct StepNotifier {
    pub channel: String,
    pub message: String,
}

impl StepNotifier {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

impl BuildNotifier for StepNotifier {
    fn name(&self) -> &str {
        "step"
    }

    fn build_payload(&self, facts: &BuildFacts, builder: &PayloadBuilder) -> NotificationPayload {
        builder.step(facts, &self.channel, &self.message)
    }
}

/// 构建完成通知器（构建结束后发送）
#[derive(Debug, Clone)]
pub struct CompletionNotifier {
    pub channel: String,
    pub message: String,
}

impl CompletionNotifier {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

impl BuildNotifier for CompletionNotifier {
    fn name(&self) -> &str {
        "completion"
    }

    fn build_payload(&self, facts: &BuildFacts, builder: &PayloadBuilder) -> NotificationPayload {
        let version = facts.resolve_version();
        let scm_link = facts.resolve_scm_link();
        builder.completion(facts, &self.channel, &self.message, &version, scm_link)
    }
}
