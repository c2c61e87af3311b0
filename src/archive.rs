//! Archive assembly: settled results in, one deflate zip blob out.

use crate::common::errors::BuildError;
use crate::models::media::TransformResult;
use log::warn;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serialize every successful result into a fresh zip container.
///
/// Failures are excluded here; they are reported through the build
/// report instead. Name collisions resolve last-write-wins, so the
/// archive never carries two entries under one name. An empty result
/// set yields a valid empty archive.
pub fn assemble(results: &[TransformResult]) -> Result<Vec<u8>, BuildError> {
    let mut entries: Vec<(&str, &[u8])> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for result in results {
        let TransformResult::Success { file_name, bytes } = result else {
            continue;
        };
        match index_by_name.get(file_name.as_str()) {
            Some(&existing) => {
                warn!("archive entry name collision, keeping the later result: {file_name}");
                entries[existing] = (file_name.as_str(), bytes.as_slice());
            }
            None => {
                index_by_name.insert(file_name.as_str(), entries.len());
                entries.push((file_name.as_str(), bytes.as_slice()));
            }
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(name, options)?;
        writer.write_all(bytes).map_err(ZipError::from)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
