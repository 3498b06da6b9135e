//! Asynchronous export reading and chunk file writing
//!
//! Same contract as `sync_reader`, on tokio's file system API so that
//! several exports can be read, and several chunks written, concurrently.
//!
//! # Architecture
//!
//! ```text
//! paths ──try_join_all──▶ tokio::fs::read ──▶ decode_export ──▶ Vec<String>
//! chunks ─try_join_all──▶ tokio::fs::write (BOM + data)
//! ```

use crate::io::csv_format::UTF8_BOM;
use crate::io::sync_reader::decode_export;
use crate::types::ConvertError;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read an export file into text
pub async fn read_export(path: &Path) -> Result<String, ConvertError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ConvertError::from_io(e, path))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_export(bytes, path)
}

/// Read several exports concurrently, preserving the order of `paths`
///
/// Fails with the first error encountered.
pub async fn read_exports(paths: &[PathBuf]) -> Result<Vec<String>, ConvertError> {
    try_join_all(paths.iter().map(|path| read_export(path))).await
}

/// Write one chunk's CSV text to `dir/file_name`, prefixed with a UTF-8 BOM
pub async fn write_chunk_file(
    dir: &Path,
    file_name: &str,
    data: &str,
) -> Result<PathBuf, ConvertError> {
    let path = dir.join(file_name);
    let mut contents = String::with_capacity(data.len() + UTF8_BOM.len_utf8());
    contents.push(UTF8_BOM);
    contents.push_str(data);

    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| ConvertError::from_io(e, &path))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Write many chunk files concurrently into `dir`, creating it first
///
/// `files` pairs a file name with its CSV text.
pub async fn write_chunk_files(
    dir: &Path,
    files: &[(String, &str)],
) -> Result<Vec<PathBuf>, ConvertError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ConvertError::from_io(e, dir))?;

    try_join_all(
        files
            .iter()
            .map(|(file_name, data)| write_chunk_file(dir, file_name, data)),
    )
    .await
}
