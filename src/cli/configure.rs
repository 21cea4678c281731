// src/cli/configure.rs
//! Configure 命令 - 保存全局配置

use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::NotifierConfig;
use crate::notification::webhook::{ProxyConfig, DEFAULT_TIMEOUT_SECS};

/// Configure 命令参数
#[derive(Args)]
pub struct ConfigureArgs {
    /// Slack incoming webhook URL
    #[arg(long)]
    pub webhook_endpoint: String,

    /// Jenkins server base URL, e.g. https://ci.example.com/
    #[arg(long)]
    pub server_url: String,

    /// HTTP proxy host
    #[arg(long)]
    pub proxy_host: Option<String>,

    /// HTTP proxy port
    #[arg(long, requires = "proxy_host")]
    pub proxy_port: Option<u16>,

    /// Proxy user name
    #[arg(long, requires = "proxy_host")]
    pub proxy_user: Option<String>,

    /// Proxy password
    #[arg(long, requires = "proxy_user")]
    pub proxy_password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Config file (default: ~/.config/slack-build-notifier/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigureArgs {
    fn to_config(&self) -> Result<NotifierConfig> {
        let proxy = match &self.proxy_host {
            Some(host) => Some(ProxyConfig {
                host: host.clone(),
                port: self
                    .proxy_port
                    .ok_or_else(|| anyhow!("--proxy-port is required with --proxy-host"))?,
                username: self.proxy_user.clone(),
                password: self.proxy_password.clone(),
            }),
            None => None,
        };

        Ok(NotifierConfig {
            webhook_endpoint: self.webhook_endpoint.clone(),
            jenkins_server_url: self.server_url.clone(),
            proxy,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// 处理 configure 命令
pub fn handle_configure(args: ConfigureArgs) -> Result<PathBuf> {
    let config = args.to_config()?;
    let path = match args.config {
        Some(p) => p,
        None => NotifierConfig::default_path()?,
    };

    config.save_to(&path)?;
    info!(path = %path.display(), "Configuration saved");
    Ok(path)
}
