//! Slack Webhook 投递模块
//!
//! 把消息序列化为 JSON，作为表单字段 `payload` 单次 POST 到 webhook。
//! 所有失败只记录日志，不会向调用方返回错误：通知失败不能让构建失败。

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use super::notifier::SendResult;
use super::payload::NotificationPayload;

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP 代理配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// 用户名非空时才认为需要代理认证
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.trim().is_empty())?;
        Some((username, self.password.as_deref().unwrap_or("")))
    }

    fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Webhook 投递目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    /// Webhook URL
    pub endpoint: String,
    pub proxy: Option<ProxyConfig>,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl WebhookTarget {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            proxy: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// 创建 HTTP 客户端，按需挂上代理及其认证
fn build_client(target: &WebhookTarget) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(target.timeout_secs));

    if let Some(proxy_config) = &target.proxy {
        let mut proxy = reqwest::Proxy::all(proxy_config.url())
            .with_context(|| format!("Invalid proxy {}", proxy_config.url()))?;

        if let Some((username, password)) = proxy_config.credentials() {
            info!(user = %username, "Using proxy authentication");
            proxy = proxy.basic_auth(username, password);
        }
        builder = builder.proxy(proxy);
    } else {
        // 只使用显式配置的代理，不读取 HTTP_PROXY 等环境变量
        builder = builder.no_proxy();
    }

    builder
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))
}

/// 单次 POST，非 2xx 视为失败
fn post(target: &WebhookTarget, payload: &NotificationPayload) -> Result<()> {
    let json = payload
        .to_json()
        .context("Failed to serialize payload")?;
    let client = build_client(target)?;

    let response = client
        .post(&target.endpoint)
        .form(&[("payload", json.as_str())])
        .send()
        .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    Err(anyhow!("Slack post may have failed ({}): {}", status, body))
}

/// 投递消息
///
/// 只尝试一次，失败记录 warn 日志并返回 [`SendResult::Failed`]。
pub fn deliver(target: &WebhookTarget, payload: &NotificationPayload) -> SendResult {
    info!(endpoint = %target.endpoint, channel = %payload.channel, "Posting to webhook");

    match post(target, payload) {
        Ok(()) => {
            info!(endpoint = %target.endpoint, "Posting succeeded");
            SendResult::Sent
        }
        Err(e) => {
            warn!(
                endpoint = %target.endpoint,
                channel = %payload.channel,
                error = %e,
                "Error posting to Slack"
            );
            SendResult::Failed(e.to_string())
        }
    }
}
