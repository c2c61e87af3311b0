//! Remote border transform - handles all video related logic
//!
//! Includes:
//! - The `BorderService` seam the orchestrator dispatches through
//! - The HTTP multipart round trip to the border-application service
//! - Deterministic derivation of the transformed output name

use crate::common::BORDERED_NAME_SUFFIX;
use crate::common::errors::{BuildError, TransformError};
use crate::config::PipelineConfig;
use crate::models::border::BorderSpec;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// The remote border-application collaborator.
///
/// The orchestrator only ever talks to this trait, so a retrying or
/// stubbed implementation can be swapped in without touching the fan-out
/// logic.
#[async_trait]
pub trait BorderService: Send + Sync {
    /// Apply the border to `bytes`, returning the transformed payload.
    /// Any transport-level problem maps to a per-item
    /// [`TransformError::Transport`].
    async fn apply_border(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        spec: &BorderSpec,
    ) -> Result<Vec<u8>, TransformError>;
}

/// `reqwest`-backed implementation posting a multipart body to the
/// configured endpoint.
pub struct HttpBorderService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBorderService {
    pub fn new(config: &PipelineConfig) -> Result<Self, BuildError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.remote_timeout_secs))
            .build()
            .map_err(|err| BuildError::Configuration(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.remote_endpoint.clone(),
        })
    }
}

#[async_trait]
impl BorderService for HttpBorderService {
    async fn apply_border(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        spec: &BorderSpec,
    ) -> Result<Vec<u8>, TransformError> {
        let part = Part::bytes(bytes).file_name(file_name.to_owned());
        let form = Form::new()
            .part("file", part)
            .text("color", spec.color_hex.clone())
            .text("width", spec.width_px.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| TransformError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransformError::Transport(format!(
                "remote border service returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransformError::Transport(err.to_string()))?;
        if body.is_empty() {
            return Err(TransformError::Transport(
                "remote border service returned an empty body".to_owned(),
            ));
        }

        Ok(body.to_vec())
    }
}

/// `<stem>_bordered.<ext>` for the usual case; names without an
/// extension (or dotfiles) get the suffix appended whole. Successive
/// builds over identical inputs therefore produce identical entry names.
pub fn bordered_file_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            format!("{stem}{BORDERED_NAME_SUFFIX}.{ext}")
        }
        _ => format!("{original}{BORDERED_NAME_SUFFIX}"),
    }
}
