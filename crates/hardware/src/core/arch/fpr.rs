//! RISC-V Floating-Point Register File.
//!
//! Registers hold raw 64-bit patterns. Single-precision values are NaN-boxed
//! by the execution engine before they get here; this file never interprets
//! the bits, so every pattern survives a checkpoint unchanged.

use crate::common::constants::NUM_REGS;

/// Floating-Point Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    fregs: [u64; NUM_REGS],
}

impl Fpr {
    /// Creates a new floating-point register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a floating-point register as raw bits.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    pub fn read(&self, idx: usize) -> u64 {
        self.fregs[idx]
    }

    /// Writes a floating-point register from raw bits.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit pattern to store.
    pub fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx] = val;
    }

    /// Reads a register as a double-precision value.
    pub fn read_f64(&self, idx: usize) -> f64 {
        f64::from_bits(self.fregs[idx])
    }

    /// Iterates over `(index, bits)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.fregs.iter().copied().enumerate()
    }
}
