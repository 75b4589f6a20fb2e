//! General-purpose and special register bank.

use mcu_bridge::RegisterFile;

/// Byte width of one instruction word.
pub const INSTRUCTION_SIZE: u16 = 2;

/// The 32 general-purpose registers plus PC, SP and the flags byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterBank {
    /// General-purpose register file.
    pub registers: RegisterFile,
    program_counter: u16,
    stack_pointer: u16,
    flags: u8,
}

impl RegisterBank {
    /// Creates a zeroed register bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// Writes the program counter.
    pub fn set_program_counter(&mut self, value: u16) {
        self.program_counter = value;
    }

    /// Advances the program counter by one instruction, wrapping at
    /// `program_size` bytes.
    pub fn increment_pc(&mut self, program_size: usize) {
        let next = self.program_counter.wrapping_add(INSTRUCTION_SIZE);
        self.program_counter = match u16::try_from(program_size) {
            Ok(size) if size > 0 => next % size,
            _ => next,
        };
    }

    /// Reads the stack pointer.
    #[must_use]
    pub const fn stack_pointer(&self) -> u16 {
        self.stack_pointer
    }

    /// Writes the stack pointer.
    pub fn set_stack_pointer(&mut self, value: u16) {
        self.stack_pointer = value;
    }

    /// Reads the raw flags byte.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Writes the raw flags byte.
    pub fn set_flags(&mut self, value: u8) {
        self.flags = value;
    }
}
