//! Container format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// ZIP end-of-central-directory magic, seen at offset 0 only for an
/// archive with no entries. A .docx always has entries.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Validate that a file looks like an Office Open XML container.
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// * `Ok(())` if the file starts with a ZIP entry header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_container_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    reader.read_exact(&mut header)?;
    detect_container_from_bytes(&header)
}

/// Validate that bytes look like an Office Open XML container.
///
/// Only the ZIP magic is checked here; whether the archive actually holds
/// a WordprocessingML part is the container parser's concern.
pub fn detect_container_from_bytes(data: &[u8]) -> Result<()> {
    if data.len() < ZIP_MAGIC.len() {
        return Err(Error::UnknownFormat);
    }
    if data.starts_with(ZIP_EMPTY_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    if !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

/// Check if a file is a plausible .docx container.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_container_from_path(path).is_ok()
}

/// Check if bytes represent a plausible .docx container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_container_from_bytes(data).is_ok()
}
