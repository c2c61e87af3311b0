//! Batch orchestration - fans one transform task out per item and fans
//! the settled results back in.
//!
//! Includes:
//! - Routing each item through the classifier at dispatch time
//! - Concurrent execution bounded by the configured ceiling
//! - All-settled fan-in that never short-circuits on a failure
//! - Composition with the archive assembler into one build outcome
//!
//! Dropping the future returned by [`BatchOrchestrator::run_batch`] (or
//! [`BatchOrchestrator::build_archive`]) aborts the internal `JoinSet`,
//! which cancels every in-flight remote call. That is the abandonment
//! path for a caller that walks away from a build.

use crate::archive::assemble;
use crate::classifier::{Route, classify};
use crate::common::errors::{BuildError, TransformError};
use crate::config::PipelineConfig;
use crate::models::border::BorderSpec;
use crate::models::media::{BuildOutcome, BuildReport, FailedItem, MediaItem, TransformResult};
use crate::processors::image::apply_image_border;
use crate::processors::video::{BorderService, HttpBorderService, bordered_file_name};
use image::Rgba;
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet, spawn_blocking};

/// The settled side of one batch: exactly one result per dispatched
/// item, plus the names excluded as unsupported.
#[derive(Debug)]
pub struct BatchResults {
    pub settled: Vec<TransformResult>,
    pub skipped: Vec<String>,
}

pub struct BatchOrchestrator {
    config: PipelineConfig,
    remote: Arc<dyn BorderService>,
}

impl BatchOrchestrator {
    /// Orchestrator talking to the configured HTTP border service.
    pub fn new(config: PipelineConfig) -> Result<Self, BuildError> {
        let remote = Arc::new(HttpBorderService::new(&config)?);
        Ok(Self::with_service(config, remote))
    }

    /// Orchestrator with a caller-provided remote collaborator. This is
    /// the seam for retry decorators and test stubs.
    pub fn with_service(config: PipelineConfig, remote: Arc<dyn BorderService>) -> Self {
        Self { config, remote }
    }

    /// Dispatch one transform task per non-skip item and wait for every
    /// dispatched task to settle, in completion order.
    ///
    /// The `BorderSpec` is snapshotted here; concurrent edits outside the
    /// build are not observable inside it. A malformed spec is rejected
    /// before anything is dispatched.
    pub async fn run_batch(
        &self,
        items: Vec<MediaItem>,
        spec: &BorderSpec,
    ) -> Result<BatchResults, BuildError> {
        let color = spec.color()?;
        let spec = spec.clone();
        let semaphore = Arc::new(Semaphore::new(self.config.effective_ceiling()));

        let mut tasks: JoinSet<TransformResult> = JoinSet::new();
        let mut names_by_task: HashMap<task::Id, String> = HashMap::new();
        let mut skipped = Vec::new();

        for item in items {
            match classify(item.kind) {
                Route::Skip => {
                    warn!("excluding unsupported item from batch: {}", item.file_name);
                    skipped.push(item.file_name);
                }
                Route::Raster => {
                    let name = item.file_name.clone();
                    let semaphore = Arc::clone(&semaphore);
                    let width_px = spec.width_px;
                    let handle = tasks.spawn(async move {
                        match semaphore.acquire_owned().await {
                            Ok(_permit) => raster_transform(item, color, width_px).await,
                            Err(_) => canceled(item.file_name),
                        }
                    });
                    names_by_task.insert(handle.id(), name);
                }
                Route::Remote => {
                    let name = item.file_name.clone();
                    let semaphore = Arc::clone(&semaphore);
                    let remote = Arc::clone(&self.remote);
                    let spec = spec.clone();
                    let handle = tasks.spawn(async move {
                        match semaphore.acquire_owned().await {
                            Ok(_permit) => remote_transform(remote, item, &spec).await,
                            Err(_) => canceled(item.file_name),
                        }
                    });
                    names_by_task.insert(handle.id(), name);
                }
            }
        }

        info!(
            "dispatched {} transform tasks, {} unsupported items excluded",
            tasks.len(),
            skipped.len()
        );

        let mut settled = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, result)) => {
                    if let TransformResult::Failure { file_name, error } = &result {
                        warn!("transform failed for {file_name}: {error}");
                    }
                    settled.push(result);
                }
                Err(join_error) => {
                    // A panicked task still owes its item a result.
                    let file_name = names_by_task
                        .get(&join_error.id())
                        .cloned()
                        .unwrap_or_default();
                    error!("transform task for {file_name} did not settle: {join_error}");
                    settled.push(canceled(file_name));
                }
            }
        }

        Ok(BatchResults { settled, skipped })
    }

    /// Run the batch, then hand every settled result to the assembler.
    ///
    /// An empty or all-skip batch still yields a (valid, empty) archive;
    /// callers that would rather skip the save step can check
    /// `report.succeeded` first.
    pub async fn build_archive(
        &self,
        items: Vec<MediaItem>,
        spec: &BorderSpec,
    ) -> Result<BuildOutcome, BuildError> {
        let BatchResults { settled, skipped } = self.run_batch(items, spec).await?;

        let mut report = BuildReport {
            skipped,
            ..BuildReport::default()
        };
        for result in &settled {
            let file_name = result.file_name().to_owned();
            match result {
                TransformResult::Success { .. } => report.succeeded.push(file_name),
                TransformResult::Failure { error, .. } => report.failed.push(FailedItem {
                    file_name,
                    reason: error.to_string(),
                }),
            }
        }

        let archive = assemble(&settled)?;
        info!("archive build complete: {}", report.summary());

        Ok(BuildOutcome { archive, report })
    }
}

/// Raster path: decode/encode are CPU bound, so the work hops onto a
/// blocking thread while this task suspends at the join.
async fn raster_transform(item: MediaItem, color: Rgba<u8>, width_px: u32) -> TransformResult {
    let MediaItem { file_name, bytes, .. } = item;
    match spawn_blocking(move || apply_image_border(&bytes, color, width_px)).await {
        Ok(Ok(bytes)) => TransformResult::Success { file_name, bytes },
        Ok(Err(error)) => TransformResult::Failure { file_name, error },
        Err(_) => canceled(file_name),
    }
}

/// Remote path: suspends at the service round trip. The output name is
/// derived from the input name; the bytes are whatever the service sent.
async fn remote_transform(
    remote: Arc<dyn BorderService>,
    item: MediaItem,
    spec: &BorderSpec,
) -> TransformResult {
    let MediaItem { file_name, bytes, .. } = item;
    match remote.apply_border(&file_name, bytes, spec).await {
        Ok(bytes) => TransformResult::Success {
            file_name: bordered_file_name(&file_name),
            bytes,
        },
        Err(error) => TransformResult::Failure { file_name, error },
    }
}

fn canceled(file_name: String) -> TransformResult {
    TransformResult::Failure {
        file_name,
        error: TransformError::Canceled,
    }
}
