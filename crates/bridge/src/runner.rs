//! Background free-run worker.
//!
//! Runs the emulator continuously, off the interactive control path, until
//! told to stop. The loop takes the bridge lock once per step, so the
//! interactive actor interleaves at instruction boundaries instead of
//! reading torn state. There is no throttling; the only delay per iteration
//! is the instruction-step cost itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::bridge::McuBridge;
use crate::surface::McuCore;

/// Observable state of the free-run worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// No worker thread is active.
    #[default]
    Stopped,
    /// A worker thread is stepping the emulator continuously.
    Running,
}

/// Drives one emulator continuously on a dedicated thread.
///
/// Cancellation is cooperative: `stop` clears a shared flag that the loop
/// reads at the top of every iteration, then joins the worker. An in-flight
/// step is never aborted; a single step is assumed fast, so stop returns
/// promptly. Dropping the runner stops it first, so the worker can never
/// outlive the bridge it steps.
#[derive(Debug)]
pub struct McuRunner<C> {
    bridge: McuBridge<C>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl<C: McuCore + Send + 'static> McuRunner<C> {
    /// Creates a stopped runner over `bridge`.
    #[must_use]
    pub fn new(bridge: McuBridge<C>) -> Self {
        Self {
            bridge,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Starts free-running. A no-op while already running, so one handle can
    /// never be stepped by two workers at once.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            log::debug!("runner already active, start ignored");
            return;
        }
        self.running.store(true, Ordering::Release);
        let bridge = self.bridge.clone();
        let running = Arc::clone(&self.running);
        log::debug!("runner starting");
        self.worker = Some(std::thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                bridge.step();
            }
        }));
    }

    /// Requests a stop and waits for the worker to exit.
    ///
    /// By the time this returns the worker thread has terminated and its
    /// last step has fully completed. A no-op while stopped.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            // A join error means the worker panicked mid-step; the flag is
            // already clear and the thread is gone, which is all stop
            // guarantees.
            let _ = worker.join();
            log::debug!("runner stopped");
        }
    }

    /// Current state of the worker.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        if self.worker.is_some() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// True while a worker thread is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// The bridge this runner steps.
    #[must_use]
    pub const fn bridge(&self) -> &McuBridge<C> {
        &self.bridge
    }
}

impl<C> Drop for McuRunner<C> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{McuRunner, RunState};
    use crate::bridge::McuBridge;
    use crate::testutil::CountingCore;

    #[test]
    fn starts_stopped_and_stop_without_start_is_benign() {
        let mut runner = McuRunner::new(McuBridge::new(CountingCore::default()));
        assert_eq!(runner.run_state(), RunState::Stopped);
        runner.stop();
        assert_eq!(runner.run_state(), RunState::Stopped);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut runner = McuRunner::new(McuBridge::new(CountingCore::default()));
        runner.start();
        runner.start();
        assert!(runner.is_running());
        runner.stop();
        assert_eq!(runner.run_state(), RunState::Stopped);
    }

    #[test]
    fn stop_leaves_state_at_an_instruction_boundary() {
        let mut runner = McuRunner::new(McuBridge::new(CountingCore::default()));
        runner.start();
        runner.stop();
        // Each step advances the counting core by one 2-byte instruction.
        assert_eq!(runner.bridge().cpu_status().pc % 2, 0);
    }

    #[test]
    fn drop_while_running_joins_the_worker() {
        let bridge = McuBridge::new(CountingCore::default());
        let mut runner = McuRunner::new(bridge.clone());
        runner.start();
        drop(runner);
        // The worker is gone; nothing keeps stepping the shared core.
        let pc = bridge.cpu_status().pc;
        assert_eq!(bridge.cpu_status().pc, pc);
    }
}
