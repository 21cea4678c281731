//! 消息构建器 - 把构建事实组装成 Slack 消息

use super::changes::summarize_change_set;
use super::payload::{
    escape, Attachment, NotificationPayload, COLOR_FAILURE, COLOR_NEUTRAL, COLOR_SUCCESS,
};
use super::status::classify;
use crate::build::{BuildFacts, BuildResult};

/// 消息构建器
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    /// Jenkins 服务器根地址，与构建相对 URL 拼接成链接
    server_url: String,
}

impl PayloadBuilder {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    fn build_link(&self, facts: &BuildFacts) -> String {
        format!("{}{}", self.server_url, facts.url)
    }

    /// 构建中途的单条通知
    ///
    /// 一个灰色附件，正文是转义后的 `message`。
    pub fn step(&self, facts: &BuildFacts, channel: &str, message: &str) -> NotificationPayload {
        let status = classify(facts.result, facts.previous_result);
        let text = format!(
            "{} - {} build {}",
            facts.project_full_name,
            facts.display_name,
            status.as_str().to_lowercase()
        );

        let jenkins = Attachment::new(COLOR_NEUTRAL)
            .with_title("Jenkins")
            .with_title_link(Some(self.build_link(facts)))
            .with_markdown_text(escape(message));

        NotificationPayload::new(channel, text, vec![jenkins])
    }

    /// 构建结束时的通知
    ///
    /// 三个同色附件：构建结果 + 变更摘要、源码 diff 链接、转义后的 `message`。
    /// 第一个附件标题只区分成功与失败，`Unstable` 也显示为失败。
    pub fn completion(
        &self,
        facts: &BuildFacts,
        channel: &str,
        message: &str,
        version: &str,
        scm_link: Option<String>,
    ) -> NotificationPayload {
        let status = classify(facts.result, facts.previous_result);
        let text = format!(
            "{} {} - {} {} after {}",
            facts.project_full_name, version, facts.display_name, status, facts.duration
        );

        let succeeded = facts
            .result
            .is_some_and(|r| r.is_better_or_equal(BuildResult::Success));
        let (color, title) = if succeeded {
            (COLOR_SUCCESS, "Jenkins Build Successfull")
        } else {
            (COLOR_FAILURE, "Jenkins Build Failed")
        };

        let jenkins = Attachment::new(color)
            .with_title(title)
            .with_title_link(Some(self.build_link(facts)))
            .with_markdown_text(summarize_change_set(&facts.changes));

        let github = Attachment::new(color)
            .with_title("Github Diff")
            .with_title_link(scm_link);

        let message = Attachment::new(color).with_markdown_text(escape(message));

        NotificationPayload::new(channel, text, vec![jenkins, github, message])
    }
}
