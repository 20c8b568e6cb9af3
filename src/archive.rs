//! ZIP extraction for disclosure archives.

use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

use crate::error::IngestError;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Returns `true` if `bytes` start with a ZIP local file header.
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Extracts the CSV payload from a ZIP archive.
///
/// Every `.csv` member is read in archive order and the last one is kept, so
/// an archive with a single export behaves as expected.
pub fn extract_csv(zip_data: &[u8]) -> Result<Vec<u8>, IngestError> {
    let mut archive = ZipArchive::new(Cursor::new(zip_data))?;
    let mut csv = None;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() || !file.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        debug!(member = file.name(), bytes = contents.len(), "Read CSV from archive");
        csv = Some(contents);
    }

    csv.ok_or(IngestError::NoCsvInArchive)
}

/// Returns CSV bytes from either a ZIP archive or plain CSV input.
pub fn csv_payload(bytes: Vec<u8>) -> Result<Vec<u8>, IngestError> {
    if is_zip(&bytes) {
        extract_csv(&bytes)
    } else {
        Ok(bytes)
    }
}
