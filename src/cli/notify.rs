// src/cli/notify.rs
//! step / completion 命令处理
//!
//! 读取宿主提供的构建事实，组装消息并投递。投递失败只记录日志，命令仍然成功退出。

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::build::BuildFacts;
use crate::config::NotifierConfig;
use crate::notification::{BuildNotifier, PayloadBuilder, SendResult};

/// 通知命令参数
#[derive(Args)]
pub struct NotifyArgs {
    /// Build facts JSON file (`-` reads stdin)
    #[arg(long)]
    pub facts: String,

    /// Slack channel, e.g. #ci
    #[arg(long)]
    pub channel: String,

    /// Free text appended to the notification
    #[arg(long, default_value = "")]
    pub message: String,

    /// Config file (default: ~/.config/slack-build-notifier/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

/// 读取构建事实
pub fn read_facts(source: &str) -> Result<BuildFacts> {
    let content = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read build facts from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read build facts {}", source))?
    };

    BuildFacts::from_json(&content).with_context(|| format!("Invalid build facts in {}", source))
}

/// 读取配置，失败时记录日志并使用默认配置
///
/// 默认配置的 endpoint 为空，随后的投递会失败并记录日志，命令本身仍然成功。
fn load_config_or_default(args: &NotifyArgs) -> NotifierConfig {
    match NotifierConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            NotifierConfig::default()
        }
    }
}

/// 处理 step / completion 命令
pub fn handle_notify(notifier: &dyn BuildNotifier, args: &NotifyArgs) -> Result<SendResult> {
    let facts = read_facts(&args.facts)?;
    let config = load_config_or_default(args);

    if args.dry_run {
        let builder = PayloadBuilder::new(config.jenkins_server_url.as_str());
        let payload = notifier.build_payload(&facts, &builder);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        info!(notifier = notifier.name(), "[DRY-RUN] payload not posted");
        return Ok(SendResult::Skipped("dry-run".to_string()));
    }

    Ok(notifier.notify(&facts, &config))
}
