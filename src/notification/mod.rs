//! 通知层 - 把构建结果组装成 Slack 消息并投递
//!
//! # 流程
//! 1. `status::classify` 得到状态标签
//! 2. `changes::summarize_change_set` 汇总变更
//! 3. `PayloadBuilder` 组装 `NotificationPayload`
//! 4. `webhook::deliver` 单次 POST，失败只记录日志
//!
//! # 使用示例
//! ```ignore
//! use slack_build_notifier::notification::{BuildNotifier, CompletionNotifier};
//!
//! let notifier = CompletionNotifier::new("#ci", "deployed to staging");
//! let result = notifier.notify(&facts, &config);
//! ```

pub mod builder;
pub mod changes;
pub mod notifier;
pub mod payload;
pub mod status;
pub mod webhook;

pub use builder::PayloadBuilder;
pub use changes::{summarize, summarize_change_set, NO_CHANGES};
pub use notifier::{BuildNotifier, CompletionNotifier, SendResult, StepNotifier};
pub use payload::{escape, Attachment, NotificationPayload};
pub use status::{classify, StatusLabel};
pub use webhook::{deliver, ProxyConfig, WebhookTarget};
