//! Status classification for build notifications
//!
//! Maps the current build result plus the previous build's result to the
//! short label shown in the message text:
//! - still running: "Starting..."
//! - success right after a failure: "Back to normal"
//! - otherwise the result itself ("Success", "Failure", "Unstable", ...)

use crate::build::BuildResult;

/// Status label for a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StatusLabel {
    Starting,
    BackToNormal,
    Success,
    Failure,
    Aborted,
    NotBuilt,
    Unstable,
    Unknown,
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Starting => "Starting...",
            StatusLabel::BackToNormal => "Back to normal",
            StatusLabel::Success => "Success",
            StatusLabel::Failure => "Failure",
            StatusLabel::Aborted => "Aborted",
            StatusLabel::NotBuilt => "Not built",
            StatusLabel::Unstable => "Unstable",
            StatusLabel::Unknown => "Unknown",
        }
    }
}

/// Classify a build
///
/// A missing previous build counts as a success, so a first build never
/// reports "Back to normal". A missing current result is "Unknown".
pub fn classify(current: Option<BuildResult>, previous: Option<BuildResult>) -> StatusLabel {
    let previous = previous.unwrap_or(BuildResult::Success);

    match (current, previous) {
        (Some(BuildResult::Building), _) => StatusLabel::Starting,
        (Some(BuildResult::Success), BuildResult::Failure) => StatusLabel::BackToNormal,
        (Some(BuildResult::Success), _) => StatusLabel::Success,
        (Some(BuildResult::Failure), _) => StatusLabel::Failure,
        (Some(BuildResult::Aborted), _) => StatusLabel::Aborted,
        (Some(BuildResult::NotBuilt), _) => StatusLabel::NotBuilt,
        (Some(BuildResult::Unstable), _) => StatusLabel::Unstable,
        (Some(BuildResult::Unknown), _) | (None, _) => StatusLabel::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Option<BuildResult>; 8] = [
        None,
        Some(BuildResult::Success),
        Some(BuildResult::Unstable),
        Some(BuildResult::Failure),
        Some(BuildResult::NotBuilt),
        Some(BuildResult::Aborted),
        Some(BuildResult::Building),
        Some(BuildResult::Unknown),
    ];

    #[test]
    fn test_building_is_starting_regardless_of_previous() {
        for previous in ALL {
            assert_eq!(
                classify(Some(BuildResult::Building), previous),
                StatusLabel::Starting
            );
        }
    }

    #[test]
    fn test_back_to_normal() {
        assert_eq!(
            classify(Some(BuildResult::Success), Some(BuildResult::Failure)),
            StatusLabel::BackToNormal
        );
        assert_eq!(
            classify(Some(BuildResult::Success), Some(BuildResult::Success)),
            StatusLabel::Success
        );
        // 只有 Failure -> Success 才算恢复
        assert_eq!(
            classify(Some(BuildResult::Success), Some(BuildResult::Unstable)),
            StatusLabel::Success
        );
    }

    #[test]
    fn test_first_build_is_plain_success() {
        assert_eq!(classify(Some(BuildResult::Success), None), StatusLabel::Success);
    }

    #[test]
    fn test_direct_mapping() {
        for previous in ALL {
            assert_eq!(classify(Some(BuildResult::Failure), previous), StatusLabel::Failure);
            assert_eq!(classify(Some(BuildResult::Aborted), previous), StatusLabel::Aborted);
            assert_eq!(classify(Some(BuildResult::NotBuilt), previous), StatusLabel::NotBuilt);
            assert_eq!(classify(Some(BuildResult::Unstable), previous), StatusLabel::Unstable);
        }
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify(None, None), StatusLabel::Unknown);
        assert_eq!(
            classify(Some(BuildResult::Unknown), Some(BuildResult::Failure)),
            StatusLabel::Unknown
        );
    }

    #[test]
    fn test_label_display() {
        assert_eq!(format!("{}", StatusLabel::BackToNormal), "Back to normal");
        assert_eq!(StatusLabel::NotBuilt.as_str(), "Not built");
        assert_eq!(StatusLabel::Starting.as_str(), "Starting...");
    }
}
