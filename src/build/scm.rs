//! 源码仓库链接解析

use serde::{Deserialize, Serialize};

/// 宿主记录的源码信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmData {
    /// 仓库浏览地址（如 `https://github.com/acme/demo`）
    #[serde(default)]
    pub browser_url: Option<String>,
    /// 最后构建的 revision（commit sha）
    #[serde(default)]
    pub revision: Option<String>,
}

/// 生成 `<browser_url>/commit/<sha>`
///
/// 没有 revision 或没有配置仓库浏览地址时返回 None。
pub fn commit_link(data: &ScmData) -> Option<String> {
    let revision = data.revision.as_deref().map(str::trim).filter(|r| !r.is_empty())?;
    let browser = data
        .browser_url
        .as_deref()
        .map(|u| u.trim().trim_end_matches('/'))
        .filter(|u| !u.is_empty())?;

    Some(format!("{}/commit/{}", browser, revision))
}
