//! RISC-V architecture-specific components.
//!
//! This module contains the architectural pieces that make up a hart's register file.
//! It includes the following modules:
//! 1. **CSRs:** Control and Status Register definitions and storage.
//! 2. **FPRs:** Floating-Point Register file implementation.
//! 3. **GPRs:** General-Purpose Register file implementation.
//! 4. **Modes:** Privilege mode definitions.
//! 5. **PMP:** Physical memory protection registers and the derived rule cache.
//! 6. **Traps:** Trap cause classification for diagnostics.

/// Control and Status Register (CSR) definitions and storage.
pub mod csr;

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Privilege mode definitions.
pub mod mode;

/// Physical memory protection state.
pub mod pmp;

/// Trap cause names and trap records.
pub mod trap;
