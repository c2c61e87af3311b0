//! bordura - batch media border pipeline.
//!
//! Takes a batch of heterogeneous media items, applies a uniform border
//! decoration to each (images in-process, videos via a remote service),
//! and bundles every successful result into one zip archive.
//!
//! The typical entry point is [`BatchOrchestrator::build_archive`]:
//!
//! ```no_run
//! use bordura::{BatchOrchestrator, BorderSpec, MediaItem, PipelineConfig};
//!
//! # async fn example() -> Result<(), bordura::BuildError> {
//! let orchestrator = BatchOrchestrator::new(PipelineConfig::default())?;
//! let items = vec![MediaItem::new("photo.png", "image/png", std::fs::read("photo.png").unwrap())];
//! let outcome = orchestrator.build_archive(items, &BorderSpec::default()).await?;
//! // outcome.archive is the zip blob; outcome.report names failures.
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod classifier;
pub mod common;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod processors;

pub use common::ARCHIVE_FILE_NAME;
pub use common::errors::{BuildError, TransformError};
pub use config::PipelineConfig;
pub use classifier::{Route, classify};
pub use models::border::BorderSpec;
pub use models::media::{BuildOutcome, BuildReport, FailedItem, MediaItem, MediaKind, TransformResult};
pub use orchestrator::{BatchOrchestrator, BatchResults};
pub use processors::video::{BorderService, HttpBorderService};
