//! Free-run worker lifecycle and manual-versus-runner step equivalence.

use std::time::{Duration, Instant};

use log as _;
use mcu_bridge::{Controller, McuBridge, McuRunner, RunState};
use mcu_refcore::{ReferenceMcu, INSTRUCTION_SIZE};
use proptest as _;
use rstest as _;
use tempfile as _;
use thiserror as _;

#[test]
fn start_then_immediate_stop_terminates_at_an_instruction_boundary() {
    let mut runner = McuRunner::new(McuBridge::new(ReferenceMcu::default()));
    runner.start();
    runner.stop();

    // stop() has joined the worker; nothing else may step the core now.
    assert_eq!(runner.run_state(), RunState::Stopped);
    let status = runner.bridge().cpu_status();
    assert_eq!(status.pc % INSTRUCTION_SIZE, 0);
    assert_eq!(runner.bridge().cpu_status(), status);
}

#[test]
fn manual_steps_reproduce_runner_driven_state() {
    let mut driven = Controller::new(ReferenceMcu::default());
    driven.start();
    let deadline = Instant::now() + Duration::from_secs(5);
    while driven.bridge().program_counter() == 0 && Instant::now() < deadline {
        std::thread::yield_now();
    }
    driven.stop();
    let driven_status = driven.status();

    // The reference core is deterministic: replaying pc / 2 manual steps on
    // a fresh core must land on identical observable state, whether or not
    // the runner wrapped program memory in between.
    let steps = driven_status.status.pc / INSTRUCTION_SIZE;
    let manual = Controller::new(ReferenceMcu::default());
    let mut manual_status = manual.status();
    for _ in 0..steps {
        manual_status = manual.step();
    }
    assert_eq!(manual_status, driven_status);
}

#[test]
fn status_polls_interleave_with_a_running_worker() {
    let mut controller = Controller::new(ReferenceMcu::default());
    controller.start();
    for _ in 0..64 {
        let status = controller.status();
        // Every snapshot is taken under the step lock, so it is aligned to
        // an instruction boundary even while the worker spins.
        assert_eq!(status.status.pc % INSTRUCTION_SIZE, 0);
    }
    controller.stop();
    assert_eq!(controller.run_state(), RunState::Stopped);
}

#[test]
fn runner_makes_progress_while_running() {
    let mut controller = Controller::new(ReferenceMcu::default());
    controller.start();
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut advanced = false;
    while Instant::now() < deadline {
        if controller.status().status.pc != 0 {
            advanced = true;
            break;
        }
        std::thread::yield_now();
    }
    controller.stop();
    assert!(advanced, "worker never completed a step");
}

#[test]
fn stop_is_prompt_and_state_stable_afterwards() {
    let mut controller = Controller::new(ReferenceMcu::default());
    controller.start();
    std::thread::sleep(Duration::from_millis(10));
    controller.stop();

    let first = controller.status();
    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(controller.status(), first);
}
