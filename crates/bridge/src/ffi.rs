//! C-linkage binding to a native emulator core.
//!
//! The argument order and symbol names here are the fixed native contract;
//! scalar widths are the native `short`/`size_t` widths, converted to the
//! unsigned types the safe seam uses. All unsafety of the crate lives in
//! this module and is gated behind the `ffi` feature so that in-process
//! embedders and the test suite never link against the native library.
#![allow(unsafe_code)]

use std::ffi::CString;
use std::os::raw::c_char;
use std::path::Path;
use std::ptr::NonNull;

use crate::load::LoadError;
use crate::surface::{McuCore, RegisterFile};

/// Opaque native emulator instance. Never constructed from Rust.
#[repr(C)]
pub struct RawMcu {
    _opaque: [u8; 0],
}

extern "C" {
    fn mcu_step(mcu: *mut RawMcu);
    fn mcu_get_register_array(mcu: *const RawMcu, buffer: *mut u8);
    fn mcu_set_register_array(mcu: *mut RawMcu, buffer: *const u8);
    fn mcu_set_register(mcu: *mut RawMcu, register_id: u8, value: u8);
    fn mcu_get_program_counter(mcu: *const RawMcu) -> i16;
    fn mcu_set_program_counter(mcu: *mut RawMcu, value: i16);
    fn mcu_get_stack_pointer(mcu: *const RawMcu) -> i16;
    fn mcu_get_current_instruction(mcu: *const RawMcu) -> i16;
    fn mcu_display_current_instruction(mcu: *const RawMcu, buffer: *mut u8, size: usize);
    fn mcu_load_bin_file(mcu: *mut RawMcu, filename: *const c_char, is_program: bool) -> u8;
    fn mcu_load_ihex_file(mcu: *mut RawMcu, filename: *const c_char) -> u8;
    fn mcu_get_data_size(mcu: *const RawMcu) -> usize;
    fn mcu_get_data_memory(mcu: *const RawMcu, buffer: *mut u8, size: usize);
    fn mcu_get_program_size(mcu: *const RawMcu) -> usize;
    fn mcu_get_program_memory(mcu: *const RawMcu, buffer: *mut u8, size: usize);
    fn mcu_get_data_byte(mcu: *const RawMcu, address: i16) -> u8;
    fn mcu_get_flags(mcu: *const RawMcu) -> u8;
    fn mcu_set_flags(mcu: *mut RawMcu, flags: u8);
}

/// Typed, non-owning handle to a native emulator instance.
///
/// The handle never allocates or frees; construction and destruction of the
/// core belong to the collaborator that built it, and every call through
/// this handle requires the core to still be alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct McuHandle(NonNull<RawMcu>);

impl McuHandle {
    /// Wraps a pointer obtained from the collaborator that owns the core.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live native emulator instance, and that
    /// instance must outlive every use of the handle.
    #[must_use]
    pub const unsafe fn from_ptr(ptr: NonNull<RawMcu>) -> Self {
        Self(ptr)
    }

    /// The raw pointer, for handing back across the native boundary.
    #[must_use]
    pub const fn as_ptr(self) -> *mut RawMcu {
        self.0.as_ptr()
    }
}

/// Native-core adapter implementing the safe surface over an [`McuHandle`].
#[derive(Debug)]
pub struct FfiMcu {
    handle: McuHandle,
}

// The native core is not thread-affine; it only requires serialized access,
// which the bridge mutex provides for the adapter's entire lifetime.
unsafe impl Send for FfiMcu {}

impl FfiMcu {
    /// Adapts a handle to the safe core surface.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that no other adapter or native code calls
    /// into the same core while this adapter exists, and that the core
    /// outlives the adapter. Wrapping the adapter in [`crate::McuBridge`]
    /// immediately and routing every call through it satisfies the first
    /// requirement.
    #[must_use]
    pub const unsafe fn new(handle: McuHandle) -> Self {
        Self { handle }
    }

    fn path_as_cstring(path: &Path) -> Result<CString, LoadError> {
        let text = path.to_str().ok_or_else(|| LoadError::InvalidPath {
            path: path.to_path_buf(),
        })?;
        CString::new(text).map_err(|_| LoadError::InvalidPath {
            path: path.to_path_buf(),
        })
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
impl McuCore for FfiMcu {
    fn step(&mut self) {
        unsafe { mcu_step(self.handle.as_ptr()) }
    }

    fn register_array(&self, out: &mut RegisterFile) {
        unsafe { mcu_get_register_array(self.handle.as_ptr(), out.as_mut_ptr()) }
    }

    fn set_register_array(&mut self, regs: &RegisterFile) {
        unsafe { mcu_set_register_array(self.handle.as_ptr(), regs.as_ptr()) }
    }

    fn set_register(&mut self, id: u8, value: u8) {
        unsafe { mcu_set_register(self.handle.as_ptr(), id, value) }
    }

    fn program_counter(&self) -> u16 {
        unsafe { mcu_get_program_counter(self.handle.as_ptr()) as u16 }
    }

    fn set_program_counter(&mut self, value: u16) {
        unsafe { mcu_set_program_counter(self.handle.as_ptr(), value as i16) }
    }

    fn stack_pointer(&self) -> u16 {
        unsafe { mcu_get_stack_pointer(self.handle.as_ptr()) as u16 }
    }

    fn current_instruction(&self) -> u16 {
        unsafe { mcu_get_current_instruction(self.handle.as_ptr()) as u16 }
    }

    fn display_current_instruction(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        unsafe {
            mcu_display_current_instruction(self.handle.as_ptr(), buf.as_mut_ptr(), buf.len());
        }
        // The native side NUL-terminates within the given capacity.
        buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
    }

    fn load_bin_file(&mut self, path: &Path, is_program: bool) -> Result<(), LoadError> {
        let filename = Self::path_as_cstring(path)?;
        let status = unsafe { mcu_load_bin_file(self.handle.as_ptr(), filename.as_ptr(), is_program) };
        if status == 0 {
            Ok(())
        } else {
            Err(LoadError::Rejected {
                path: path.to_path_buf(),
                status,
            })
        }
    }

    fn load_ihex_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let filename = Self::path_as_cstring(path)?;
        let status = unsafe { mcu_load_ihex_file(self.handle.as_ptr(), filename.as_ptr()) };
        if status == 0 {
            Ok(())
        } else {
            Err(LoadError::Rejected {
                path: path.to_path_buf(),
                status,
            })
        }
    }

    fn data_size(&self) -> usize {
        unsafe { mcu_get_data_size(self.handle.as_ptr()) }
    }

    fn copy_data_memory(&self, out: &mut [u8]) {
        unsafe { mcu_get_data_memory(self.handle.as_ptr(), out.as_mut_ptr(), out.len()) }
    }

    fn program_size(&self) -> usize {
        unsafe { mcu_get_program_size(self.handle.as_ptr()) }
    }

    fn copy_program_memory(&self, out: &mut [u8]) {
        unsafe { mcu_get_program_memory(self.handle.as_ptr(), out.as_mut_ptr(), out.len()) }
    }

    fn data_byte(&self, addr: u16) -> u8 {
        unsafe { mcu_get_data_byte(self.handle.as_ptr(), addr as i16) }
    }

    fn flags(&self) -> u8 {
        unsafe { mcu_get_flags(self.handle.as_ptr()) }
    }

    fn set_flags(&mut self, flags: u8) {
        unsafe { mcu_set_flags(self.handle.as_ptr(), flags) }
    }
}
