pub mod errors;

/// Fixed name the embedding shell hands to its save collaborator.
pub const ARCHIVE_FILE_NAME: &str = "files.zip";

/// Suffix inserted before the extension of remotely transformed videos.
pub const BORDERED_NAME_SUFFIX: &str = "_bordered";

pub const DEFAULT_MAX_CONCURRENT: usize = 8;

pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_REMOTE_ENDPOINT: &str = "http://127.0.0.1:8100/api/border";
