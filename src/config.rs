//! 全局配置 - webhook 地址、Jenkins 根地址、代理
//!
//! 读取优先级：
//! 1. 环境变量 `SLACK_WEBHOOK_URL` / `JENKINS_SERVER_URL`（非空时覆盖）
//! 2. 配置文件 `~/.config/slack-build-notifier/config.json`（或 `--config` 指定）
//! 3. 默认值（空 endpoint，投递会失败并记录日志）

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::notification::webhook::{ProxyConfig, WebhookTarget, DEFAULT_TIMEOUT_SECS};

/// Webhook 地址环境变量
pub const ENV_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Jenkins 根地址环境变量
pub const ENV_SERVER_URL: &str = "JENKINS_SERVER_URL";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// 通知器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Slack incoming webhook URL
    #[serde(default)]
    pub webhook_endpoint: String,
    /// Jenkins 服务器根地址（以 `/` 结尾）
    #[serde(default)]
    pub jenkins_server_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_endpoint: String::new(),
            jenkins_server_url: String::new(),
            proxy: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NotifierConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        Ok(home.join(".config/slack-build-notifier/config.json"))
    }

    /// 读取配置文件，文件不存在时返回默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// 读取配置并应用环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(
            std::env::var(ENV_WEBHOOK_URL).ok(),
            std::env::var(ENV_SERVER_URL).ok(),
        );
        Ok(config)
    }

    /// 非空的覆盖值替换配置文件中的值
    pub fn apply_overrides(&mut self, webhook_endpoint: Option<String>, server_url: Option<String>) {
        if let Some(endpoint) = webhook_endpoint.filter(|v| !v.trim().is_empty()) {
            debug!("Using {} from environment", ENV_WEBHOOK_URL);
            self.webhook_endpoint = endpoint;
        }
        if let Some(url) = server_url.filter(|v| !v.trim().is_empty()) {
            debug!("Using {} from environment", ENV_SERVER_URL);
            self.jenkins_server_url = url;
        }
    }

    /// 整体写回配置文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// 投递目标
    pub fn webhook_target(&self) -> WebhookTarget {
        let target = WebhookTarget::new(self.webhook_endpoint.as_str()).with_timeout_secs(self.timeout_secs);
        match &self.proxy {
            Some(proxy) => target.with_proxy(proxy.clone()),
            None => target,
        }
    }
}
