//! Native call surface consumed by the bridge, expressed as a safe trait.
//!
//! One method per native entry point, same argument order. Cores that live in
//! a foreign library implement this through the `ffi` module's adapter;
//! in-process cores implement it directly. The trait deliberately mirrors the C-linkage
//! contract instead of idealizing it: sizes are queried separately from
//! copies, the decoded-instruction fetch writes into a caller-supplied
//! buffer, and invalid register ids are a caller precondition rather than a
//! checked error.

use std::path::Path;

use crate::load::LoadError;

/// Number of general-purpose registers in the register file.
pub const REGISTER_COUNT: usize = 32;

/// Capacity of the decoded-instruction text buffer, terminator included.
pub const DECODED_TEXT_CAP: usize = 64;

/// Whole register file, index = register id (`0..=31`).
pub type RegisterFile = [u8; REGISTER_COUNT];

/// Operations an emulator core exposes to the bridge.
///
/// The core provides no internal locking; callers must serialize access to
/// one core instance. [`crate::McuBridge`] is that serialization point.
pub trait McuCore {
    /// Advances the emulator by exactly one instruction.
    ///
    /// Any part of the observable state may change. There is no error
    /// channel; core-side faults must surface through pollable state.
    fn step(&mut self);

    /// Copies the whole register file into `out`.
    fn register_array(&self, out: &mut RegisterFile);

    /// Overwrites the whole register file from `regs`.
    fn set_register_array(&mut self, regs: &RegisterFile);

    /// Writes a single register.
    ///
    /// Precondition: `id < 32`. The surface does not validate the id; an
    /// out-of-range id is a contract violation on the native side.
    fn set_register(&mut self, id: u8, value: u8);

    /// Reads the program counter.
    fn program_counter(&self) -> u16;

    /// Writes the program counter.
    fn set_program_counter(&mut self, value: u16);

    /// Reads the stack pointer.
    fn stack_pointer(&self) -> u16;

    /// Reads the opcode of the instruction at the current program counter.
    fn current_instruction(&self) -> u16;

    /// Renders the decoded mnemonic of the current instruction into `buf`.
    ///
    /// Writes at most `buf.len()` bytes and returns the number written.
    /// The core must never write past the caller's capacity.
    fn display_current_instruction(&self, buf: &mut [u8]) -> usize;

    /// Loads a raw binary file verbatim at address 0 into the selected bank.
    ///
    /// # Errors
    ///
    /// Fails with [`LoadError`] when the file cannot be read or the core
    /// rejects the load. A failed load must leave memory unchanged.
    fn load_bin_file(&mut self, path: &Path, is_program: bool) -> Result<(), LoadError>;

    /// Parses an Intel HEX file into program memory at its record addresses.
    ///
    /// # Errors
    ///
    /// Fails with [`LoadError`] on I/O failure or a malformed record or
    /// checksum. A failed load must leave memory unchanged (no partial
    /// application).
    fn load_ihex_file(&mut self, path: &Path) -> Result<(), LoadError>;

    /// Current size of data memory in bytes.
    fn data_size(&self) -> usize;

    /// Copies data memory into `out`, clamped to the shorter length.
    fn copy_data_memory(&self, out: &mut [u8]);

    /// Current size of program memory in bytes.
    fn program_size(&self) -> usize;

    /// Copies program memory into `out`, clamped to the shorter length.
    fn copy_program_memory(&self, out: &mut [u8]);

    /// Reads one byte of data memory.
    fn data_byte(&self, addr: u16) -> u8;

    /// Reads the raw flags byte (bit7..bit0 = I,T,H,S,V,N,Z,C).
    fn flags(&self) -> u8;

    /// Writes the raw flags byte.
    fn set_flags(&mut self, flags: u8);
}
