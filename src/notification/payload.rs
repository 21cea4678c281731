//! Payload 模块 - Slack webhook 消息结构
//!
//! 序列化后的格式：
//! ```json
//! {
//!   "channel": "#ci",
//!   "username": "Jenkins",
//!   "text": "Demo 1.2.0 - #12 Success after 54 sec",
//!   "icon_url": "https://...",
//!   "link_names": 1,
//!   "attachments": [
//!     {
//!       "fallback": "not printable",
//!       "color": "#36a64f",
//!       "title": "Jenkins Build Successfull",
//!       "title_link": "https://ci.example.com/job/Demo/12/",
//!       "text": "Changes:\n- Fix login [Bob]",
//!       "mrkdwn_in": ["text"]
//!     }
//!   ]
//! }
//! ```
//!
//! 缺失的 `title` / `title_link` / `text` 不会出现在 JSON 中。

use serde::Serialize;

/// 发送者显示名
pub const USERNAME: &str = "Jenkins";

/// 发送者头像
pub const ICON_URL: &str = "https://wiki.jenkins-ci.org/download/attachments/2916393/headshot.png?version=1&modificationDate=1302753947000";

/// 附件的纯文本回退内容
pub const FALLBACK: &str = "not printable";

/// 成功（及更好）的颜色
pub const COLOR_SUCCESS: &str = "#36a64f";

/// 失败颜色
pub const COLOR_FAILURE: &str = "#CD0000";

/// 构建中途通知使用的中性灰
pub const COLOR_NEUTRAL: &str = "#c2c2d6";

/// 转义 Slack 控制字符
///
/// `&` 必须最先替换，否则 `&lt;` 中的 `&` 会被二次转义。
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 消息附件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 允许 markdown 渲染的字段
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

impl Attachment {
    /// 创建只有颜色的空附件
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            fallback: FALLBACK.to_string(),
            color: color.into(),
            title: None,
            title_link: None,
            text: None,
            mrkdwn_in: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 设置标题链接，None 表示不带链接
    pub fn with_title_link(mut self, link: Option<String>) -> Self {
        self.title_link = link;
        self
    }

    /// 设置正文并开启 markdown 渲染
    pub fn with_markdown_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        if !self.mrkdwn_in.iter().any(|f| f == "text") {
            self.mrkdwn_in.push("text".to_string());
        }
        self
    }
}

/// 完整的通知消息，构建后只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub channel: String,
    pub username: String,
    pub text: String,
    pub icon_url: String,
    pub link_names: u8,
    pub attachments: Vec<Attachment>,
}

impl NotificationPayload {
    pub fn new(channel: impl Into<String>, text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            channel: channel.into(),
            username: USERNAME.to_string(),
            text: text.into(),
            icon_url: ICON_URL.to_string(),
            link_names: 1,
            attachments,
        }
    }

    /// 序列化为 webhook 的 `payload` 字段内容
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_order() {
        assert_eq!(escape("<a & b>"), "&lt;a &amp; b&gt;");
        // 已转义的文本会再转义一次 &，而不是保持原样
        assert_eq!(escape("&lt;"), "&amp;lt;");
        assert_eq!(escape("plain *bold*"), "plain *bold*");
    }

    #[test]
    fn test_attachment_skips_absent_fields() {
        let attachment = Attachment::new(COLOR_FAILURE).with_title("Github Diff");
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["fallback"], "not printable");
        assert_eq!(json["color"], "#CD0000");
        assert_eq!(json["title"], "Github Diff");
        assert!(json.get("title_link").is_none());
        assert!(json.get("text").is_none());
        assert!(json.get("mrkdwn_in").is_none());
    }

    #[test]
    fn test_markdown_text_sets_mrkdwn_in_once() {
        let attachment = Attachment::new(COLOR_SUCCESS)
            .with_markdown_text("a")
            .with_markdown_text("b");
        assert_eq!(attachment.text.as_deref(), Some("b"));
        assert_eq!(attachment.mrkdwn_in, vec!["text".to_string()]);
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = NotificationPayload::new(
            "#ci",
            "Demo - #1 build success",
            vec![Attachment::new(COLOR_NEUTRAL).with_markdown_text("hi")],
        );
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["channel"], "#ci");
        assert_eq!(json["username"], "Jenkins");
        assert_eq!(json["icon_url"], ICON_URL);
        assert_eq!(json["link_names"], 1);
        assert_eq!(json["attachments"][0]["mrkdwn_in"], serde_json::json!(["text"]));
    }
}
