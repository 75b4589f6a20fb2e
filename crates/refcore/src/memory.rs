//! Byte-addressed memory bank.

/// One bank of microcontroller memory.
///
/// Addresses wrap at the bank size, so a byte read can never fault; copies
/// in either direction clamp to the shorter length, so a mismatched buffer
/// yields a short transfer rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBank {
    bytes: Vec<u8>,
}

impl MemoryBank {
    /// Creates a zero-filled bank of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Bank size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-sized bank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `address`, wrapping at the bank size.
    #[must_use]
    pub fn byte(&self, address: u16) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        self.bytes[usize::from(address) % self.bytes.len()]
    }

    /// Writes a byte at `address`, wrapping at the bank size.
    pub fn set_byte(&mut self, address: u16, value: u8) {
        if self.bytes.is_empty() {
            return;
        }
        let wrapped = usize::from(address) % self.bytes.len();
        self.bytes[wrapped] = value;
    }

    /// Little-endian 16-bit word at `address`, bytes wrapping individually.
    #[must_use]
    pub fn word(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.byte(address), self.byte(address.wrapping_add(1))])
    }

    /// Copies `source` into the bank starting at address 0, clamped to the
    /// shorter length.
    pub fn copy_into(&mut self, source: &[u8]) {
        let n = source.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&source[..n]);
    }

    /// Copies the bank into `out` starting at address 0, clamped to the
    /// shorter length.
    pub fn copy_from(&self, out: &mut [u8]) {
        let n = out.len().min(self.bytes.len());
        out[..n].copy_from_slice(&self.bytes[..n]);
    }
}
