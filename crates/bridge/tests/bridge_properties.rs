//! Quiescent-state bridge contract coverage over the reference core.

use log as _;
use mcu_bridge::{McuBridge, RegisterFile, StatusFlags};
use mcu_refcore::ReferenceMcu;
use proptest::prelude::*;
use rstest as _;
use tempfile as _;
use thiserror as _;

fn bridge() -> McuBridge<ReferenceMcu> {
    McuBridge::new(ReferenceMcu::default())
}

#[test]
fn every_register_write_reads_back_through_the_array_snapshot() {
    let bridge = bridge();
    for id in 0..32_u8 {
        let value = id.wrapping_mul(7).wrapping_add(1);
        bridge.set_register(id, value);
        assert_eq!(bridge.register_array()[usize::from(id)], value);
    }
}

#[test]
fn whole_array_write_reads_back_identically() {
    let bridge = bridge();
    let mut regs = RegisterFile::default();
    for (id, slot) in regs.iter_mut().enumerate() {
        *slot = u8::try_from(id).expect("register id fits in u8");
    }
    bridge.set_register_array(&regs);
    assert_eq!(bridge.register_array(), regs);
}

#[test]
fn flags_byte_bit_mapping_decodes_interrupt_and_carry() {
    let bridge = bridge();
    bridge.set_flags(StatusFlags::from(0b1000_0001));
    let flags = bridge.flags();
    assert!(flags.interrupt);
    assert!(flags.carry);
    assert!(!flags.transfer);
    assert!(!flags.half_carry);
    assert!(!flags.sign);
    assert!(!flags.overflow);
    assert!(!flags.negative);
    assert!(!flags.zero);
}

#[test]
fn cpu_status_agrees_with_individual_reads() {
    let bridge = bridge();
    bridge.set_program_counter(0x0040);
    bridge.set_flags(StatusFlags::from(0b0000_0010));
    let status = bridge.cpu_status();
    assert_eq!(status.pc, bridge.program_counter());
    assert_eq!(status.sp, bridge.stack_pointer());
    assert_eq!(status.opcode, bridge.current_instruction());
    assert_eq!(status.flags, bridge.flags());
}

#[test]
fn decoded_text_is_bounded_by_the_capacity_contract() {
    let bridge = bridge();
    let text = bridge.decoded_instruction();
    assert!(text.len() <= mcu_bridge::DECODED_TEXT_CAP);
    assert!(!text.is_empty());
}

#[test]
fn memory_snapshots_match_the_default_geometry() {
    let bridge = bridge();
    let snapshot = bridge.memory_snapshot();
    assert_eq!(snapshot.data.len(), mcu_refcore::DEFAULT_DATA_SIZE);
    assert_eq!(snapshot.program.len(), mcu_refcore::DEFAULT_PROGRAM_SIZE);
}

proptest! {
    #[test]
    fn program_counter_roundtrips_for_all_values(value in any::<u16>()) {
        let bridge = bridge();
        bridge.set_program_counter(value);
        prop_assert_eq!(bridge.program_counter(), value);
    }

    #[test]
    fn flags_roundtrip_for_all_bytes(byte in any::<u8>()) {
        let bridge = bridge();
        bridge.set_flags(StatusFlags::from(byte));
        prop_assert_eq!(u8::from(bridge.flags()), byte);
    }
}
