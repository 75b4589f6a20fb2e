//! Decoded view of the status-register flags byte.

/// `I` (global interrupt enable) bit of the flags byte.
pub const FLAG_I: u8 = 1 << 7;
/// `T` (bit copy storage) bit of the flags byte.
pub const FLAG_T: u8 = 1 << 6;
/// `H` (half carry) bit of the flags byte.
pub const FLAG_H: u8 = 1 << 5;
/// `S` (sign) bit of the flags byte.
pub const FLAG_S: u8 = 1 << 4;
/// `V` (two's complement overflow) bit of the flags byte.
pub const FLAG_V: u8 = 1 << 3;
/// `N` (negative) bit of the flags byte.
pub const FLAG_N: u8 = 1 << 2;
/// `Z` (zero) bit of the flags byte.
pub const FLAG_Z: u8 = 1 << 1;
/// `C` (carry) bit of the flags byte.
pub const FLAG_C: u8 = 1 << 0;

/// Bit-decoded status flags.
///
/// Conversions to and from the raw byte are lossless in both directions;
/// the byte layout is bit7..bit0 = I,T,H,S,V,N,Z,C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct StatusFlags {
    /// Global interrupt enable.
    pub interrupt: bool,
    /// Bit copy storage.
    pub transfer: bool,
    /// Half carry.
    pub half_carry: bool,
    /// Sign (`N ^ V`).
    pub sign: bool,
    /// Two's complement overflow.
    pub overflow: bool,
    /// Negative result.
    pub negative: bool,
    /// Zero result.
    pub zero: bool,
    /// Carry or borrow.
    pub carry: bool,
}

impl From<u8> for StatusFlags {
    fn from(byte: u8) -> Self {
        Self {
            interrupt: byte & FLAG_I != 0,
            transfer: byte & FLAG_T != 0,
            half_carry: byte & FLAG_H != 0,
            sign: byte & FLAG_S != 0,
            overflow: byte & FLAG_V != 0,
            negative: byte & FLAG_N != 0,
            zero: byte & FLAG_Z != 0,
            carry: byte & FLAG_C != 0,
        }
    }
}

impl From<StatusFlags> for u8 {
    fn from(flags: StatusFlags) -> Self {
        let mut byte = 0;
        if flags.interrupt {
            byte |= FLAG_I;
        }
        if flags.transfer {
            byte |= FLAG_T;
        }
        if flags.half_carry {
            byte |= FLAG_H;
        }
        if flags.sign {
            byte |= FLAG_S;
        }
        if flags.overflow {
            byte |= FLAG_V;
        }
        if flags.negative {
            byte |= FLAG_N;
        }
        if flags.zero {
            byte |= FLAG_Z;
        }
        if flags.carry {
            byte |= FLAG_C;
        }
        byte
    }
}
