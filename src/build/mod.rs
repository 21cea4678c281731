//! 构建信息 - 由 CI 宿主提供的只读构建事实
//!
//! 宿主（Jenkins job）把构建状态、变更集、工作区等信息以 JSON 形式交给 `sbn`：
//! ```json
//! {
//!   "project_full_name": "Demo",
//!   "display_name": "#12",
//!   "url": "job/Demo/12/",
//!   "duration": "54 sec",
//!   "result": "SUCCESS",
//!   "previous_result": "FAILURE",
//!   "workspace": "/var/lib/jenkins/workspace/Demo",
//!   "changes": { "computed": true, "entries": [{ "message": "Fix login", "author": "Bob" }] },
//!   "scm": { "browser_url": "https://github.com/acme/demo", "revision": "3f2a9c1" }
//! }
//! ```

pub mod scm;
pub mod version;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub use scm::ScmData;

/// 构建结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    /// 构建仍在进行中
    Building,
    /// 无法识别的结果
    #[serde(other)]
    Unknown,
}

impl BuildResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::NotBuilt => "NOT_BUILT",
            BuildResult::Aborted => "ABORTED",
            BuildResult::Building => "BUILDING",
            BuildResult::Unknown => "UNKNOWN",
        }
    }

    /// 严重程度序号，越小越好；进行中和未知结果没有序号
    fn ordinal(&self) -> Option<u8> {
        match self {
            BuildResult::Success => Some(0),
            BuildResult::Unstable => Some(1),
            BuildResult::Failure => Some(2),
            BuildResult::NotBuilt => Some(3),
            BuildResult::Aborted => Some(4),
            BuildResult::Building | BuildResult::Unknown => None,
        }
    }

    /// 是否不差于 `other`
    pub fn is_better_or_equal(&self, other: BuildResult) -> bool {
        match (self.ordinal(), other.ordinal()) {
            (Some(a), Some(b)) => a <= b,
            _ => false,
        }
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单条变更（提交信息 + 作者显示名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub message: String,
    pub author: String,
}

impl ChangeEntry {
    pub fn new(message: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            author: author.into(),
        }
    }
}

/// 变更集
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// 宿主是否成功计算了变更（无法确定 diff 时为 false）
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    /// 已计算的变更集
    pub fn computed(entries: Vec<ChangeEntry>) -> Self {
        Self {
            computed: true,
            entries,
        }
    }

    /// 宿主未能计算的变更集
    pub fn not_computed() -> Self {
        Self::default()
    }
}

/// 构建事实
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildFacts {
    /// 项目完整显示名
    pub project_full_name: String,
    /// 构建显示名（如 `#12`）
    pub display_name: String,
    /// 相对于服务器根地址的构建 URL
    #[serde(default)]
    pub url: String,
    /// 构建耗时（如 `54 sec`）
    #[serde(default)]
    pub duration: String,
    /// 当前结果，缺失视为未知
    #[serde(default)]
    pub result: Option<BuildResult>,
    /// 上一次构建的结果，没有上一次构建时为 None
    #[serde(default)]
    pub previous_result: Option<BuildResult>,
    /// 显式版本号，优先于工作区 `.version` 文件
    #[serde(default)]
    pub version: Option<String>,
    /// 工作区目录
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    /// 显式源码提交链接，优先于 `scm` 解析
    #[serde(default)]
    pub scm_link: Option<String>,
    #[serde(default)]
    pub scm: Option<ScmData>,
    #[serde(default)]
    pub changes: ChangeSet,
}

impl BuildFacts {
    /// 从 JSON 文本解析
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_building(&self) -> bool {
        self.result == Some(BuildResult::Building)
    }

    /// 解析版本号，读取失败时记录日志并返回空串
    pub fn resolve_version(&self) -> String {
        if let Some(version) = &self.version {
            return version.trim().to_string();
        }

        let Some(workspace) = &self.workspace else {
            warn!(project = %self.project_full_name, "No workspace, version left empty");
            return String::new();
        };

        match version::read_version(workspace) {
            Ok(version) => version,
            Err(e) => {
                warn!(
                    workspace = %workspace.display(),
                    error = %e,
                    "error reading version file"
                );
                String::new()
            }
        }
    }

    /// 解析源码提交链接，无法解析时为 None
    pub fn resolve_scm_link(&self) -> Option<String> {
        if let Some(link) = self.scm_link.as_ref().filter(|l| !l.trim().is_empty()) {
            return Some(link.clone());
        }
        self.scm.as_ref().and_then(scm::commit_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_result_ordering() {
        assert!(BuildResult::Success.is_better_or_equal(BuildResult::Success));
        assert!(!BuildResult::Unstable.is_better_or_equal(BuildResult::Success));
        assert!(!BuildResult::Failure.is_better_or_equal(BuildResult::Success));
        assert!(BuildResult::Failure.is_better_or_equal(BuildResult::Aborted));
        // 进行中和未知结果不参与比较
        assert!(!BuildResult::Building.is_better_or_equal(BuildResult::Aborted));
        assert!(!BuildResult::Unknown.is_better_or_equal(BuildResult::Aborted));
    }

    #[test]
    fn test_build_result_deserialize() {
        let r: BuildResult = serde_json::from_str(r#""NOT_BUILT""#).unwrap();
        assert_eq!(r, BuildResult::NotBuilt);
        let r: BuildResult = serde_json::from_str(r#""CANCELLED_BY_ROBOT""#).unwrap();
        assert_eq!(r, BuildResult::Unknown);
    }

    #[test]
    fn test_facts_from_json_defaults() {
        let facts = BuildFacts::from_json(
            r##"{"project_full_name": "Demo", "display_name": "#1"}"##,
        )
        .unwrap();
        assert_eq!(facts.result, None);
        assert!(!facts.changes.computed);
        assert!(facts.changes.entries.is_empty());
        assert!(!facts.is_building());
    }

    #[test]
    fn test_resolve_version_prefers_explicit() {
        let facts = BuildFacts {
            version: Some(" v1.1.7\n".to_string()),
            ..Default::default()
        };
        assert_eq!(facts.resolve_version(), "v1.1.7");
    }

    #[test]
    fn test_resolve_version_without_workspace_is_empty() {
        let facts = BuildFacts::default();
        assert_eq!(facts.resolve_version(), "");
    }

    #[test]
    fn test_resolve_version_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let facts = BuildFacts {
            workspace: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(facts.resolve_version(), "");
    }

    #[test]
    fn test_resolve_scm_link_explicit_wins() {
        let facts = BuildFacts {
            scm_link: Some("https://example.com/c/1".to_string()),
            scm: Some(ScmData {
                browser_url: Some("https://github.com/acme/demo".to_string()),
                revision: Some("abc".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(facts.resolve_scm_link().as_deref(), Some("https://example.com/c/1"));
    }

    #[test]
    fn test_resolve_scm_link_absent() {
        assert_eq!(BuildFacts::default().resolve_scm_link(), None);
    }
}
