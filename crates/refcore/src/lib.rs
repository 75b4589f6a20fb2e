//! In-process reference MCU core for the `mcu-bridge` surface.
//!
//! Implements everything the bridge's native surface assigns to "the
//! emulator core" — register file, PC/SP/flags, two memory banks, binary and
//! Intel HEX loading — without implementing an instruction set. Its `step`
//! is the minimal deterministic behavior the surface contract requires:
//! fetch the word at PC, advance by one instruction, count the cycle. That
//! is enough to embed the bridge, runner and controller without a native
//! emulator library, and to test them end to end.

/// Byte-addressed memory bank.
pub mod memory;
pub use memory::MemoryBank;

/// General-purpose and special register bank.
pub mod registers;
pub use registers::{RegisterBank, INSTRUCTION_SIZE};

/// Binary and Intel HEX file loaders.
pub mod loader;
pub use loader::{parse_ihex, read_bin, Segment};

use std::fmt::Write as _;
use std::path::Path;

use mcu_bridge::{LoadError, McuCore, RegisterFile};

/// Default data memory size in bytes (attiny85-class geometry).
pub const DEFAULT_DATA_SIZE: usize = 512;
/// Default program memory size in bytes (attiny85-class geometry).
pub const DEFAULT_PROGRAM_SIZE: usize = 8 * 1024;

/// Reference emulator core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMcu {
    reg_bank: RegisterBank,
    data: MemoryBank,
    program: MemoryBank,
    cycle_count: u64,
}

impl Default for ReferenceMcu {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_SIZE, DEFAULT_PROGRAM_SIZE)
    }
}

impl ReferenceMcu {
    /// Creates a core with the given memory geometry.
    #[must_use]
    pub fn new(data_size: usize, program_size: usize) -> Self {
        Self {
            reg_bank: RegisterBank::new(),
            data: MemoryBank::new(data_size),
            program: MemoryBank::new(program_size),
            cycle_count: 0,
        }
    }

    /// Number of completed steps since construction.
    #[must_use]
    pub const fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    fn fetch(&self) -> u16 {
        self.program.word(self.reg_bank.program_counter())
    }
}

impl McuCore for ReferenceMcu {
    fn step(&mut self) {
        // Fetch-advance only; instruction semantics belong to a real core.
        let _opcode = self.fetch();
        self.reg_bank.increment_pc(self.program.len());
        self.cycle_count += 1;
    }

    fn register_array(&self, out: &mut RegisterFile) {
        *out = self.reg_bank.registers;
    }

    fn set_register_array(&mut self, regs: &RegisterFile) {
        self.reg_bank.registers = *regs;
    }

    fn set_register(&mut self, id: u8, value: u8) {
        self.reg_bank.registers[usize::from(id)] = value;
    }

    fn program_counter(&self) -> u16 {
        self.reg_bank.program_counter()
    }

    fn set_program_counter(&mut self, value: u16) {
        self.reg_bank.set_program_counter(value);
    }

    fn stack_pointer(&self) -> u16 {
        self.reg_bank.stack_pointer()
    }

    fn current_instruction(&self) -> u16 {
        self.fetch()
    }

    fn display_current_instruction(&self, buf: &mut [u8]) -> usize {
        let mut text = String::new();
        // Raw-word rendering; mnemonic decoding is out of this core's scope.
        let _ = write!(text, ".dw {:#06x}", self.fetch());
        let n = text.len().min(buf.len());
        buf[..n].copy_from_slice(&text.as_bytes()[..n]);
        n
    }

    fn load_bin_file(&mut self, path: &Path, is_program: bool) -> Result<(), LoadError> {
        let bytes = loader::read_bin(path)?;
        if is_program {
            self.program.copy_into(&bytes);
        } else {
            self.data.copy_into(&bytes);
        }
        Ok(())
    }

    fn load_ihex_file(&mut self, path: &Path) -> Result<(), LoadError> {
        // Stage the whole file first; memory is untouched on any error.
        let segments = loader::parse_ihex(path)?;
        for segment in segments {
            for (index, byte) in segment.bytes.iter().enumerate() {
                let address =
                    segment.offset.wrapping_add(u16::try_from(index).unwrap_or(u16::MAX));
                self.program.set_byte(address, *byte);
            }
        }
        Ok(())
    }

    fn data_size(&self) -> usize {
        self.data.len()
    }

    fn copy_data_memory(&self, out: &mut [u8]) {
        self.data.copy_from(out);
    }

    fn program_size(&self) -> usize {
        self.program.len()
    }

    fn copy_program_memory(&self, out: &mut [u8]) {
        self.program.copy_from(out);
    }

    fn data_byte(&self, addr: u16) -> u8 {
        self.data.byte(addr)
    }

    fn flags(&self) -> u8 {
        self.reg_bank.flags()
    }

    fn set_flags(&mut self, flags: u8) {
        self.reg_bank.set_flags(flags);
    }
}

#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
