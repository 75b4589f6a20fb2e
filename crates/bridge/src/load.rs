//! Memory load targets and the load-failure taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Memory bank a binary load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MemoryKind {
    /// Data memory.
    Data,
    /// Program memory.
    Program,
}

impl MemoryKind {
    /// Maps the bank selector to the native `is_program` argument.
    #[must_use]
    pub const fn is_program(self) -> bool {
        matches!(self, Self::Program)
    }
}

/// Failure of a file load requested through the bridge.
///
/// A failed load leaves emulator memory in its pre-load state; partial
/// application is a core-side contract violation, not an error variant.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// An Intel HEX record failed structure or checksum validation.
    #[error("malformed intel hex in {}: {reason}", path.display())]
    MalformedIhex {
        /// Path of the rejected file.
        path: PathBuf,
        /// Reader diagnostic for the offending record.
        reason: String,
    },
    /// The path cannot be represented at the native boundary.
    #[error("path not representable for the emulator core: {}", path.display())]
    InvalidPath {
        /// Offending path.
        path: PathBuf,
    },
    /// The emulator core reported a nonzero load status.
    #[error("emulator core rejected load of {} (status {status})", path.display())]
    Rejected {
        /// Path of the rejected file.
        path: PathBuf,
        /// Raw native status code.
        status: u8,
    },
}
