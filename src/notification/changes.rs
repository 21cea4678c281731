//! 变更摘要 - 把构建的变更集整理成消息正文

use std::collections::HashSet;

use crate::build::{ChangeEntry, ChangeSet};

/// 没有变更时的固定文案
pub const NO_CHANGES: &str = "No Changes.";

/// 汇总变更条目
///
/// 每条格式为 `<message> [<author>]`，完全相同的条目只保留第一次出现的位置。
/// 空列表返回 [`NO_CHANGES`]。
pub fn summarize(entries: &[ChangeEntry]) -> String {
    if entries.is_empty() {
        return NO_CHANGES.to_string();
    }

    let mut seen = HashSet::new();
    let commits: Vec<String> = entries
        .iter()
        .map(|entry| format!("{} [{}]", entry.message, entry.author))
        .filter(|commit| seen.insert(commit.clone()))
        .collect();

    format!("Changes:\n- {}", commits.join("\n- "))
}

/// 汇总变更集，宿主未计算变更时同样返回 [`NO_CHANGES`]
pub fn summarize_change_set(changes: &ChangeSet) -> String {
    if !changes.computed {
        return NO_CHANGES.to_string();
    }
    summarize(&changes.entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), "No Changes.");
        assert_eq!(summarize_change_set(&ChangeSet::computed(vec![])), "No Changes.");
    }

    #[test]
    fn test_summarize_not_computed() {
        let mut changes = ChangeSet::not_computed();
        changes.entries.push(ChangeEntry::new("ignored", "Alice"));
        assert_eq!(summarize_change_set(&changes), "No Changes.");
    }

    #[test]
    fn test_summarize_dedup() {
        let entries = vec![
            ChangeEntry::new("fix bug", "Alice"),
            ChangeEntry::new("fix bug", "Alice"),
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.matches("fix bug [Alice]").count(), 1);
        assert_eq!(summary, "Changes:\n- fix bug [Alice]");
    }

    #[test]
    fn test_summarize_same_message_different_author() {
        let entries = vec![
            ChangeEntry::new("fix bug", "Alice"),
            ChangeEntry::new("fix bug", "Bob"),
            ChangeEntry::new("add docs", "Alice"),
        ];
        assert_eq!(
            summarize(&entries),
            "Changes:\n- fix bug [Alice]\n- fix bug [Bob]\n- add docs [Alice]"
        );
    }
}
