//! Media item model and per-item/batch outcome types.

use crate::common::errors::TransformError;
use serde::{Deserialize, Serialize};

/// Declared media kind of an uploaded item.
///
/// Closed enumeration: adding a kind is a localized change to this enum,
/// the classifier match, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

impl MediaKind {
    /// Map a MIME-style kind string onto the closed enumeration.
    /// `image/*` and `video/*` are recognized; anything else, including
    /// the empty string, is `Unsupported`.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Unsupported
        }
    }
}

/// One user-selected file: declared kind, original name, raw payload.
/// Immutable once constructed; owned by the build it is submitted to.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub file_name: String,
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

impl MediaItem {
    pub fn new(file_name: impl Into<String>, mime: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: MediaKind::from_mime(mime),
            bytes,
        }
    }
}

/// The settled outcome of one dispatched transform task.
///
/// Exactly one of these is produced per non-skipped item, success or
/// failure; a failure carries the originating item's name so the report
/// can point at it.
#[derive(Debug, Clone)]
pub enum TransformResult {
    Success { file_name: String, bytes: Vec<u8> },
    Failure { file_name: String, error: TransformError },
}

impl TransformResult {
    pub fn file_name(&self) -> &str {
        match self {
            TransformResult::Success { file_name, .. } => file_name,
            TransformResult::Failure { file_name, .. } => file_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransformResult::Success { .. })
    }
}

/// One failed item as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    pub file_name: String,
    pub reason: String,
}

/// Per-build observability: which items made it into the archive, which
/// failed and why, which were excluded as unsupported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedItem>,
    pub skipped: Vec<String>,
}

impl BuildReport {
    /// Number of transform tasks that settled (success or failure).
    pub fn settled(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Human-readable one-liner, e.g. `2 of 5 items failed, 1 skipped`.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} items failed, {} skipped",
            self.failed.len(),
            self.settled(),
            self.skipped.len()
        )
    }
}

/// The terminal product of one archive build: the zip blob plus the
/// report describing what it contains.
#[derive(Debug)]
pub struct BuildOutcome {
    pub archive: Vec<u8>,
    pub report: BuildReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_routing_is_total() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("image/svg+xml"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("video/quicktime"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_mime("audio/ogg"), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_mime("image"), MediaKind::Unsupported);
    }

    #[test]
    fn report_summary_counts() {
        let report = BuildReport {
            succeeded: vec!["a.png".into(), "b.png".into(), "c.png".into()],
            failed: vec![FailedItem {
                file_name: "d.mp4".into(),
                reason: "remote transform failed: timeout".into(),
            }],
            skipped: vec!["e.pdf".into()],
        };
        assert_eq!(report.settled(), 4);
        assert_eq!(report.summary(), "1 of 4 items failed, 1 skipped");
    }
}
