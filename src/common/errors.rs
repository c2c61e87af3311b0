//! Error taxonomy for the border pipeline.
//!
//! Per-item failures ([`TransformError`]) are captured inside
//! `TransformResult::Failure` and never abort the batch. Build-level
//! failures ([`BuildError`]) terminate the whole archive build.

use thiserror::Error;

/// A failure that settles one item without touching its siblings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Source bytes could not be interpreted as an image.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The bordered canvas could not be re-encoded.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Network failure, timeout, non-success status, or malformed body
    /// from the remote border service.
    #[error("remote transform failed: {0}")]
    Transport(String),

    /// The task was aborted or panicked before settling.
    #[error("transform did not settle")]
    Canceled,
}

/// A failure of the whole archive build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The border spec was rejected at input validation (bad hex color).
    #[error("invalid border spec: {0}")]
    InvalidSpec(String),

    /// The remote service client could not be constructed.
    #[error("invalid pipeline configuration: {0}")]
    Configuration(String),

    /// Archive serialization itself failed. No partial archive is
    /// meaningful, so this is terminal for the build.
    #[error("archive assembly failed: {0}")]
    Assembly(#[from] zip::result::ZipError),
}
