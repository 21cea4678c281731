//! Slack Build Notifier CLI
//!
//! 在构建过程中或构建结束后把结果发送到 Slack

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use slack_build_notifier::{
    cli::{handle_configure, handle_notify, ConfigureArgs, NotifyArgs},
    CompletionNotifier, SendResult, StepNotifier,
};

#[derive(Parser)]
#[command(name = "sbn")]
#[command(about = "Slack Build Notifier - 把 CI 构建结果发送到 Slack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建进行中发送一条通知
    Step(NotifyArgs),
    /// 构建结束后发送完整通知（状态、变更、diff 链接）
    Completion(NotifyArgs),
    /// 保存 webhook / Jenkins 地址 / 代理配置
    Configure(ConfigureArgs),
}

fn report(result: SendResult) {
    match result {
        SendResult::Sent => info!("Notification delivered"),
        SendResult::Skipped(reason) => info!(reason = %reason, "Notification skipped"),
        // 投递失败不影响构建结果
        SendResult::Failed(reason) => warn!(reason = %reason, "Notification not delivered"),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slack_build_notifier=info,sbn=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Step(args) => {
            let notifier = StepNotifier::new(args.channel.as_str(), args.message.as_str());
            report(handle_notify(&notifier, &args)?);
        }
        Commands::Completion(args) => {
            let notifier = CompletionNotifier::new(args.channel.as_str(), args.message.as_str());
            report(handle_notify(&notifier, &args)?);
        }
        Commands::Configure(args) => {
            let path = handle_configure(args)?;
            println!("Configuration saved to {}", path.display());
        }
    }

    Ok(())
}
