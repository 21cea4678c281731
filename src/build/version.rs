//! 工作区版本文件读取

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 版本文件名（相对工作区根目录）
pub const VERSION_FILE: &str = ".version";

/// 读取 `<workspace>/.version`，按行拼接后去除首尾空白
pub fn read_version(workspace: &Path) -> Result<String> {
    let path = workspace.join(VERSION_FILE);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let joined = content
        .lines()
        .map(|line| format!("{}\n", line))
        .collect::<String>();
    Ok(joined.trim().to_string())
}
