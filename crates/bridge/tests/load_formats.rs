//! Load-format dispatch and load-failure atomicity through the controller.

use std::io::Write;

use log as _;
use mcu_bridge::{Controller, LoadError, MemoryKind};
use mcu_refcore::ReferenceMcu;
use proptest as _;
use rstest::rstest;
use tempfile::NamedTempFile;
use thiserror as _;

fn controller() -> Controller<ReferenceMcu> {
    Controller::new(ReferenceMcu::default())
}

fn file_with(contents: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write fixture");
    file
}

#[test]
fn binary_program_load_is_verbatim_from_address_zero() {
    let controller = controller();
    let image: Vec<u8> = (0..100_u8).collect();
    let file = file_with(&image, ".bin");

    controller
        .load_program_file(file.path())
        .expect("load binary program");

    let program = controller.memory().program;
    assert!(program.len() >= image.len());
    assert_eq!(&program[..image.len()], &image[..]);
}

#[test]
fn hex_extension_dispatches_to_the_ihex_loader() {
    let controller = controller();
    let file = file_with(b":0400100001020304E2\n:00000001FF\n", ".hex");

    controller
        .load_program_file(file.path())
        .expect("load ihex program");

    let program = controller.memory().program;
    // Record bytes land at the record offset, not at address 0.
    assert_eq!(&program[0x10..0x14], &[1, 2, 3, 4]);
    assert_eq!(program[0], 0);
}

#[rstest]
#[case(".HEX")]
#[case(".Hex")]
fn hex_extension_dispatch_is_case_insensitive(#[case] suffix: &str) {
    let controller = controller();
    let file = file_with(b":0400100001020304E2\n:00000001FF\n", suffix);

    controller
        .load_program_file(file.path())
        .expect("load ihex program");
    assert_eq!(&controller.memory().program[0x10..0x14], &[1, 2, 3, 4]);
}

#[test]
fn corrupt_ihex_leaves_program_memory_byte_identical() {
    let controller = controller();
    let image = [0xAA_u8; 32];
    let good = file_with(&image, ".bin");
    controller
        .load_program_file(good.path())
        .expect("load binary program");
    let before = controller.memory().program;

    let corrupt = file_with(b":0400100001020304FF\n:00000001FF\n", ".hex");
    let err = controller
        .load_program_file(corrupt.path())
        .expect_err("corrupt checksum must fail");
    assert!(matches!(err, LoadError::MalformedIhex { .. }));

    assert_eq!(controller.memory().program, before);
}

#[test]
fn data_file_load_targets_data_memory_only() {
    let controller = controller();
    let file = file_with(&[0x5A; 16], ".bin");

    controller
        .load_data_file(file.path())
        .expect("load data image");

    let memory = controller.memory();
    assert_eq!(&memory.data[..16], &[0x5A; 16]);
    assert!(memory.program.iter().all(|&b| b == 0));
}

#[test]
fn missing_file_reports_io_failure_and_mutates_nothing() {
    let controller = controller();
    let before = controller.memory();
    let err = controller
        .load_program_file(std::path::Path::new("does-not-exist.bin"))
        .expect_err("missing file must fail");
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(controller.memory(), before);
}

#[test]
fn bridge_level_bank_selection_matches_the_kind_argument() {
    let controller = controller();
    let file = file_with(&[0x77; 8], ".bin");

    controller
        .bridge()
        .load_bin_file(file.path(), MemoryKind::Program)
        .expect("load into program bank");
    assert_eq!(&controller.memory().program[..8], &[0x77; 8]);
    assert!(controller.memory().data.iter().all(|&b| b == 0));
}
