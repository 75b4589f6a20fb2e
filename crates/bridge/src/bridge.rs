//! Typed, buffer-safe façade over one emulator core.
//!
//! The bridge owns no emulator state of its own; it forwards requests and
//! marshals buffers. What it does own is the serialization point: one mutex
//! per core, held for the full duration of every operation, including each
//! iteration of the free-run worker. The native core has no internal
//! locking, so this single lock is what keeps every snapshot aligned to an
//! instruction boundary.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::flags::StatusFlags;
use crate::load::{LoadError, MemoryKind};
use crate::surface::{McuCore, RegisterFile, DECODED_TEXT_CAP};

/// Scalar CPU state captured in one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CpuStatus {
    /// Program counter.
    pub pc: u16,
    /// Stack pointer.
    pub sp: u16,
    /// Opcode of the instruction at the current program counter.
    pub opcode: u16,
    /// Decoded status flags byte.
    pub flags: StatusFlags,
}

/// Full interactive-refresh snapshot: registers, scalars, decoded mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StatusSnapshot {
    /// Register file copy.
    pub registers: RegisterFile,
    /// Scalar CPU state.
    pub status: CpuStatus,
    /// Human-readable rendering of the current instruction, truncated to
    /// [`DECODED_TEXT_CAP`].
    pub decoded: String,
}

/// Point-in-time copy of both memory banks. Expensive; taken on demand only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MemorySnapshot {
    /// Data memory contents.
    pub data: Vec<u8>,
    /// Program memory contents.
    pub program: Vec<u8>,
}

/// Serializing façade over one [`McuCore`].
///
/// Clones share the same core and the same lock, so a clone handed to the
/// free-run worker contends with the interactive actor at instruction
/// granularity instead of racing it. The bridge never caches or interprets
/// values; every read is a fresh round trip.
#[derive(Debug)]
pub struct McuBridge<C> {
    core: Arc<Mutex<C>>,
}

impl<C> Clone for McuBridge<C> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<C: McuCore> McuBridge<C> {
    /// Wraps a core in a new serialization point.
    pub fn new(core: C) -> Self {
        Self {
            core: Arc::new(Mutex::new(core)),
        }
    }

    /// Runs `op` with the core lock held.
    ///
    /// A panic while the lock was held poisons the mutex; the panic itself
    /// already propagated to the responsible thread, so later callers take
    /// the guard anyway rather than wedging every subsequent operation.
    fn with_core<T>(&self, op: impl FnOnce(&mut C) -> T) -> T {
        let mut core = self.core.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut core)
    }

    /// Advances the emulator by exactly one instruction.
    pub fn step(&self) {
        self.with_core(McuCore::step);
    }

    /// Snapshot of the whole register file.
    #[must_use]
    pub fn register_array(&self) -> RegisterFile {
        self.with_core(|core| {
            let mut regs = RegisterFile::default();
            core.register_array(&mut regs);
            regs
        })
    }

    /// Overwrites the whole register file. The input is only read.
    pub fn set_register_array(&self, regs: &RegisterFile) {
        self.with_core(|core| core.set_register_array(regs));
    }

    /// Writes a single register.
    ///
    /// Precondition: `id < 32`; the bridge forwards the id unchecked, per
    /// the native surface contract.
    pub fn set_register(&self, id: u8, value: u8) {
        debug_assert!(
            usize::from(id) < crate::surface::REGISTER_COUNT,
            "register id {id} out of range"
        );
        self.with_core(|core| core.set_register(id, value));
    }

    /// Reads the program counter.
    #[must_use]
    pub fn program_counter(&self) -> u16 {
        self.with_core(|core| core.program_counter())
    }

    /// Writes the program counter.
    pub fn set_program_counter(&self, value: u16) {
        self.with_core(|core| core.set_program_counter(value));
    }

    /// Reads the stack pointer.
    #[must_use]
    pub fn stack_pointer(&self) -> u16 {
        self.with_core(|core| core.stack_pointer())
    }

    /// Reads the opcode at the current program counter.
    #[must_use]
    pub fn current_instruction(&self) -> u16 {
        self.with_core(|core| core.current_instruction())
    }

    /// Decoded mnemonic of the current instruction.
    ///
    /// The core writes into a bridge-owned buffer of [`DECODED_TEXT_CAP`]
    /// bytes and can never write past it; longer renderings are truncated.
    #[must_use]
    pub fn decoded_instruction(&self) -> String {
        self.with_core(|core| {
            let mut buf = [0_u8; DECODED_TEXT_CAP];
            let written = core.display_current_instruction(&mut buf).min(buf.len());
            String::from_utf8_lossy(&buf[..written]).into_owned()
        })
    }

    /// Reads the decoded flags byte.
    #[must_use]
    pub fn flags(&self) -> StatusFlags {
        self.with_core(|core| StatusFlags::from(core.flags()))
    }

    /// Writes the flags byte.
    pub fn set_flags(&self, flags: StatusFlags) {
        self.with_core(|core| core.set_flags(flags.into()));
    }

    /// Reads one byte of data memory.
    #[must_use]
    pub fn data_byte(&self, addr: u16) -> u8 {
        self.with_core(|core| core.data_byte(addr))
    }

    /// All scalar CPU state, captured under one lock acquisition.
    #[must_use]
    pub fn cpu_status(&self) -> CpuStatus {
        self.with_core(|core| Self::status_locked(core))
    }

    /// Registers, scalars and decoded text, captured under one acquisition.
    #[must_use]
    pub fn status_snapshot(&self) -> StatusSnapshot {
        self.with_core(|core| {
            let mut registers = RegisterFile::default();
            core.register_array(&mut registers);
            let mut buf = [0_u8; DECODED_TEXT_CAP];
            let written = core.display_current_instruction(&mut buf).min(buf.len());
            StatusSnapshot {
                registers,
                status: Self::status_locked(core),
                decoded: String::from_utf8_lossy(&buf[..written]).into_owned(),
            }
        })
    }

    /// Snapshot of data memory, sized by the core at snapshot time.
    ///
    /// Size query and copy happen under the same lock acquisition, so an
    /// in-process core cannot resize or step between the two. A native core
    /// that still manages to return fewer bytes than it promised yields a
    /// short (zero-padded) read, never a fault.
    #[must_use]
    pub fn data_memory(&self) -> Vec<u8> {
        self.with_core(|core| {
            let mut buf = vec![0_u8; core.data_size()];
            core.copy_data_memory(&mut buf);
            buf
        })
    }

    /// Snapshot of program memory, sized by the core at snapshot time.
    #[must_use]
    pub fn program_memory(&self) -> Vec<u8> {
        self.with_core(|core| {
            let mut buf = vec![0_u8; core.program_size()];
            core.copy_program_memory(&mut buf);
            buf
        })
    }

    /// Both memory banks, captured under one acquisition.
    #[must_use]
    pub fn memory_snapshot(&self) -> MemorySnapshot {
        self.with_core(|core| {
            let mut data = vec![0_u8; core.data_size()];
            core.copy_data_memory(&mut data);
            let mut program = vec![0_u8; core.program_size()];
            core.copy_program_memory(&mut program);
            MemorySnapshot { data, program }
        })
    }

    /// Loads a raw binary file verbatim at address 0 into `kind` memory.
    ///
    /// # Errors
    ///
    /// Propagates the core's [`LoadError`]; memory is unchanged on failure.
    pub fn load_bin_file(&self, path: &Path, kind: MemoryKind) -> Result<(), LoadError> {
        self.with_core(|core| core.load_bin_file(path, kind.is_program()))
            .inspect_err(|err| log::warn!("binary load failed: {err}"))
    }

    /// Loads an Intel HEX file into program memory at its record addresses.
    ///
    /// # Errors
    ///
    /// Propagates the core's [`LoadError`]; memory is unchanged on failure.
    pub fn load_ihex_file(&self, path: &Path) -> Result<(), LoadError> {
        self.with_core(|core| core.load_ihex_file(path))
            .inspect_err(|err| log::warn!("ihex load failed: {err}"))
    }

    fn status_locked(core: &mut C) -> CpuStatus {
        CpuStatus {
            pc: core.program_counter(),
            sp: core.stack_pointer(),
            opcode: core.current_instruction(),
            flags: StatusFlags::from(core.flags()),
        }
    }
}
