//! Synchronous export reading and chunk file writing
//!
//! Exports are small enough to read whole, so the readers return the
//! decoded text and leave parsing to `csv_format::parse_rows`.
//!
//! # Error Handling
//!
//! - Missing files map to `ConvertError::FileNotFound`
//! - Bytes that are not UTF-8 map to `ConvertError::InvalidEncoding`
//! - Anything else the OS reports becomes `ConvertError::IoError`

use crate::io::csv_format::UTF8_BOM;
use crate::types::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decode raw export bytes as UTF-8
pub fn decode_export(bytes: Vec<u8>, path: &Path) -> Result<String, ConvertError> {
    String::from_utf8(bytes).map_err(|_| ConvertError::invalid_encoding(path))
}

/// Read an export file into text
///
/// # Examples
///
/// ```no_run
/// use paypay_mf_converter::io::sync_reader::read_export;
/// use std::path::Path;
///
/// let text = read_export(Path::new("paypay.csv")).unwrap();
/// println!("{} bytes", text.len());
/// ```
pub fn read_export(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|e| ConvertError::from_io(e, path))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_export(bytes, path)
}

/// Write one chunk's CSV text to `dir/file_name`, prefixed with a UTF-8 BOM
///
/// Creates `dir` if needed and returns the path written.
pub fn write_chunk_file(dir: &Path, file_name: &str, data: &str) -> Result<PathBuf, ConvertError> {
    fs::create_dir_all(dir).map_err(|e| ConvertError::from_io(e, dir))?;

    let path = dir.join(file_name);
    let mut contents = String::with_capacity(data.len() + UTF8_BOM.len_utf8());
    contents.push(UTF8_BOM);
    contents.push_str(data);

    fs::write(&path, contents).map_err(|e| ConvertError::from_io(e, &path))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}
