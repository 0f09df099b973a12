//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file of a hart.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Iteration:** Exposes registers in index order for dumps and checkpoints.

use crate::common::constants::NUM_REGS;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified. Values are stored at full 64-bit
/// width; 32-bit harts keep the upper half clear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; NUM_REGS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to write. Writes to `x0` are discarded.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Iterates over `(index, value)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        (0..NUM_REGS).map(|i| (i, self.read(i)))
    }
}
