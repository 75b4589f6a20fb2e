//! Control-and-introspection bridge for an opaque 8-bit MCU emulator core.
//!
//! The emulator core owns instruction semantics and file parsing; this crate
//! owns the contract for driving it safely from a controlling process: a
//! serializing façade ([`McuBridge`]), a background free-run worker
//! ([`McuRunner`]), and the orchestration layer ([`Controller`]) that
//! single-steps, free-runs, snapshots, and dispatches file loads by format.

/// Native call surface contract and register-file primitives.
pub mod surface;
pub use surface::{McuCore, RegisterFile, DECODED_TEXT_CAP, REGISTER_COUNT};

/// Status-register flags byte decoding.
pub mod flags;
pub use flags::{
    StatusFlags, FLAG_C, FLAG_H, FLAG_I, FLAG_N, FLAG_S, FLAG_T, FLAG_V, FLAG_Z,
};

/// Memory load targets and load-failure taxonomy.
pub mod load;
pub use load::{LoadError, MemoryKind};

/// Serializing façade and snapshot types.
pub mod bridge;
pub use bridge::{CpuStatus, McuBridge, MemorySnapshot, StatusSnapshot};

/// Background free-run worker.
pub mod runner;
pub use runner::{McuRunner, RunState};

/// Controller orchestration and load-format dispatch.
pub mod controller;
pub use controller::Controller;

/// C-linkage binding to a native emulator core.
#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "ffi")]
pub use ffi::{FfiMcu, McuHandle, RawMcu};

#[cfg(test)]
use mcu_refcore as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
