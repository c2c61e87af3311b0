//! Pipeline configuration.
//!
//! The core never reads the environment or the command line; the
//! embedding shell constructs (or deserializes) a `PipelineConfig` and
//! hands it in.

use crate::common::{DEFAULT_MAX_CONCURRENT, DEFAULT_REMOTE_ENDPOINT, DEFAULT_REMOTE_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Endpoint of the remote border-application service.
    pub remote_endpoint: String,
    /// Round-trip timeout for one remote call, in seconds.
    pub remote_timeout_secs: u64,
    /// Ceiling on concurrently running transform tasks. `0` is clamped
    /// to `1` rather than meaning "unbounded".
    pub max_concurrent: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: DEFAULT_REMOTE_ENDPOINT.to_owned(),
            remote_timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl PipelineConfig {
    pub fn effective_ceiling(&self) -> usize {
        self.max_concurrent.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ceiling_is_clamped() {
        let config = PipelineConfig {
            max_concurrent: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.effective_ceiling(), 1);
    }

    #[test]
    fn defaults_are_sane() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_concurrent, 8);
        assert_eq!(config.remote_timeout_secs, 30);
        assert!(config.remote_endpoint.starts_with("http"));
    }
}
