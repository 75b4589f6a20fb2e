//! File loaders: raw binary images and Intel HEX.
//!
//! Parsing is fully separated from application: a HEX file is staged record
//! by record and only handed to the caller once every record, checksum
//! included, has validated. A malformed file therefore never partially
//! mutates emulator memory.

use std::fs;
use std::path::Path;

use mcu_bridge::LoadError;

/// One validated contiguous run of program bytes from a HEX file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Load address of the first byte.
    pub offset: u16,
    /// Bytes to place at `offset`.
    pub bytes: Vec<u8>,
}

/// Reads a raw binary image.
///
/// # Errors
///
/// Fails with [`LoadError::Io`] when the file cannot be read.
pub fn read_bin(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an Intel HEX file into staged segments.
///
/// Record structure and checksums are validated for the whole file before
/// anything is returned. Non-data record types are accepted and skipped;
/// only data records produce segments.
///
/// # Errors
///
/// Fails with [`LoadError::Io`] when the file cannot be read and
/// [`LoadError::MalformedIhex`] on the first invalid record.
pub fn parse_ihex(path: &Path) -> Result<Vec<Segment>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut segments = Vec::new();
    for record in ihex::Reader::new(&text) {
        let record = record.map_err(|err| LoadError::MalformedIhex {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        match record {
            ihex::Record::Data { offset, value } => segments.push(Segment {
                offset,
                bytes: value,
            }),
            ihex::Record::EndOfFile => break,
            other => {
                log::debug!("skipping non-data ihex record {other:?}");
            }
        }
    }
    Ok(segments)
}
