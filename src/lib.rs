//! Slack Build Notifier - 把 CI 构建结果发送到 Slack webhook

pub mod build;
pub mod cli;
pub mod config;
pub mod notification;

pub use build::{BuildFacts, BuildResult, ChangeEntry, ChangeSet, ScmData};
pub use config::NotifierConfig;
pub use notification::{
    classify, deliver, escape, summarize, summarize_change_set, Attachment, BuildNotifier,
    CompletionNotifier, NotificationPayload, PayloadBuilder, ProxyConfig, SendResult, StatusLabel,
    StepNotifier, WebhookTarget,
};
