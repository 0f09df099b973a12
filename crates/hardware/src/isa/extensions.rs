//! ISA extension bits and the canonical ISA string.
//!
//! This module maps single-letter extensions onto `misa` bits and renders the
//! identity string of a resolved hart. It provides:
//! 1. **Width:** The `Xlen` base-width type and its `misa` MXL encoding.
//! 2. **Extension Bits:** One `misa` bit per letter (`'A'` is bit 0).
//! 3. **Formatting:** `isa_string`, which walks the architecture-defined letter order.

use std::fmt;

use serde::Deserialize;

/// Returns the `misa` bit for an upper-case extension letter.
pub const fn misa_bit(letter: u8) -> u64 {
    1 << (letter - b'A')
}

/// Base integer ISA.
pub const RVI: u64 = misa_bit(b'I');
/// Reduced base integer ISA (16 registers).
pub const RVE: u64 = misa_bit(b'E');
/// Integer multiply/divide.
pub const RVM: u64 = misa_bit(b'M');
/// Atomics.
pub const RVA: u64 = misa_bit(b'A');
/// Single-precision floating point.
pub const RVF: u64 = misa_bit(b'F');
/// Double-precision floating point.
pub const RVD: u64 = misa_bit(b'D');
/// Compressed instructions.
pub const RVC: u64 = misa_bit(b'C');
/// Supervisor mode.
pub const RVS: u64 = misa_bit(b'S');
/// User mode.
pub const RVU: u64 = misa_bit(b'U');
/// Hypervisor.
pub const RVH: u64 = misa_bit(b'H');
/// Bit manipulation.
pub const RVB: u64 = misa_bit(b'B');
/// Vector.
pub const RVV: u64 = misa_bit(b'V');

/// Mask covering the 26 extension bits of `misa`.
pub const MISA_EXT_MASK: u64 = (1 << 26) - 1;

/// Order in which extension letters appear in an ISA string.
pub const CANONICAL_ORDER: &[u8; 26] = b"IEMAFDQCLBJTPVNSUHKORWXYZG";

/// Base integer register width of a hart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Xlen {
    /// 32-bit registers.
    Rv32,
    /// 64-bit registers.
    #[default]
    Rv64,
    /// 128-bit registers. Only meaningful for formatting; harts cannot be resolved at this width.
    Rv128,
}

impl Xlen {
    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
            Self::Rv128 => 128,
        }
    }

    /// MXL field of `misa` for this width, positioned in the top two bits of the register.
    pub const fn misa_mxl(self) -> u64 {
        match self {
            Self::Rv32 => 1 << 30,
            Self::Rv64 => 2 << 62,
            Self::Rv128 => 3 << 62,
        }
    }

    /// Decodes the width from a `misa` value.
    ///
    /// A value without a 64/128-bit MXL field is treated as 32-bit, which is
    /// also how a `misa` with no MXL bits at all is interpreted.
    pub const fn from_misa(misa: u64) -> Self {
        match misa >> 62 {
            2 => Self::Rv64,
            3 => Self::Rv128,
            _ => Self::Rv32,
        }
    }

    /// Mask of the bits a register of this width can hold.
    pub const fn value_mask(self) -> u64 {
        match self {
            Self::Rv32 => 0xFFFF_FFFF,
            Self::Rv64 | Self::Rv128 => u64::MAX,
        }
    }

    /// Number of hex digits used to print one register of this width.
    pub const fn hex_digits(self) -> usize {
        match self {
            Self::Rv32 => 8,
            Self::Rv64 | Self::Rv128 => 16,
        }
    }

    /// Architecture name reported to debuggers.
    pub const fn gdb_arch_name(self) -> &'static str {
        match self {
            Self::Rv32 => "riscv:rv32",
            Self::Rv64 | Self::Rv128 => "riscv:rv64",
        }
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rv{}", self.bits())
    }
}

/// Returns true if `misa` has the extension named by the upper-case `letter`.
pub const fn has_ext(misa: u64, letter: u8) -> bool {
    misa & misa_bit(letter) != 0
}

/// Renders the canonical lower-case ISA string, e.g. `rv64imafdcsu`.
///
/// Letters are emitted in [`CANONICAL_ORDER`], so the result depends only on
/// the set bits of `misa` and the width.
pub fn isa_string(misa: u64, xlen: Xlen) -> String {
    let mut isa = xlen.to_string();
    for &letter in CANONICAL_ORDER {
        if has_ext(misa, letter) {
            isa.push(letter.to_ascii_lowercase() as char);
        }
    }
    isa
}
