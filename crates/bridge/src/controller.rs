//! Controller orchestration over one emulator: stepping, free-running,
//! snapshot refresh, and load-format dispatch.

use std::path::Path;

use crate::bridge::{McuBridge, MemorySnapshot, StatusSnapshot};
use crate::load::{LoadError, MemoryKind};
use crate::runner::{McuRunner, RunState};
use crate::surface::McuCore;

/// Orchestrates single steps, free-running, snapshots and file loads for one
/// emulator core.
///
/// Every step or load returns a fresh [`StatusSnapshot`] so the embedder can
/// refresh its display without a second round trip. Memory banks are
/// expensive and only captured through [`Controller::memory`]. How often to
/// poll while the runner is active is the embedder's policy, not a bridge
/// contract.
#[derive(Debug)]
pub struct Controller<C> {
    bridge: McuBridge<C>,
    runner: McuRunner<C>,
}

impl<C: McuCore + Send + 'static> Controller<C> {
    /// Takes ownership of a core and wires a bridge and a runner around it.
    #[must_use]
    pub fn new(core: C) -> Self {
        Self::with_bridge(McuBridge::new(core))
    }

    /// Wires a runner around an existing bridge.
    #[must_use]
    pub fn with_bridge(bridge: McuBridge<C>) -> Self {
        let runner = McuRunner::new(bridge.clone());
        Self { bridge, runner }
    }

    /// Direct access to the underlying bridge.
    #[must_use]
    pub const fn bridge(&self) -> &McuBridge<C> {
        &self.bridge
    }

    /// Executes one instruction and returns the refreshed status.
    #[must_use]
    pub fn step(&self) -> StatusSnapshot {
        self.bridge.step();
        self.bridge.status_snapshot()
    }

    /// Current status without stepping.
    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        self.bridge.status_snapshot()
    }

    /// On-demand copy of both memory banks.
    #[must_use]
    pub fn memory(&self) -> MemorySnapshot {
        self.bridge.memory_snapshot()
    }

    /// Starts free-running. A no-op while already running.
    pub fn start(&mut self) {
        self.runner.start();
    }

    /// Stops free-running; the worker has exited when this returns.
    pub fn stop(&mut self) {
        self.runner.stop();
    }

    /// Observable state of the free-run worker.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.runner.run_state()
    }

    /// Loads a program file, dispatching on the filename.
    ///
    /// Files with a `.hex` extension (ASCII case-insensitive) go through the
    /// Intel HEX loader; everything else is loaded verbatim into program
    /// memory. Returns the refreshed status on success.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadError`]; emulator memory is unchanged on failure.
    pub fn load_program_file(&self, path: &Path) -> Result<StatusSnapshot, LoadError> {
        if is_ihex(path) {
            self.bridge.load_ihex_file(path)?;
        } else {
            self.bridge.load_bin_file(path, MemoryKind::Program)?;
        }
        Ok(self.bridge.status_snapshot())
    }

    /// Loads a raw binary file into data memory.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadError`]; emulator memory is unchanged on failure.
    pub fn load_data_file(&self, path: &Path) -> Result<StatusSnapshot, LoadError> {
        self.bridge.load_bin_file(path, MemoryKind::Data)?;
        Ok(self.bridge.status_snapshot())
    }
}

/// True when the filename carries an Intel HEX extension.
fn is_ihex(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hex"))
}
