//! RISC-V hart model library.
//!
//! This crate models a RISC-V hardware thread outside of instruction execution:
//! 1. **ISA:** Extension resolution of a requested profile into a validated `misa`, and the ISA string.
//! 2. **Core:** Register file, PMP state, trap naming and the construct/realize/reset lifecycle.
//! 3. **Snapshot:** A line-oriented text checkpoint of the full register file.
//! 4. **SoC:** The test-finisher device and a multi-hart machine that services reset and exit requests.
//! 5. **Configuration:** Named hart models, per-option overrides and JSON loading.
//!
//! Instruction execution is external; it plugs in through `ExecutionEngine`.

/// Common constants and error types.
pub mod common;
/// Hart configuration (models, overrides, JSON loading).
pub mod config;
/// Hart core (register file, lifecycle, dump).
pub mod core;
/// Instruction set (extensions, versions, resolution, trap causes).
pub mod isa;
/// Register-file checkpoint codec.
pub mod snapshot;
/// System-on-chip (device trait, test finisher, machine).
pub mod soc;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// A single hart; construct with `Hart::new` or `Hart::from_model`.
pub use crate::core::Hart;
/// Multi-hart machine; construct with `Machine::new`.
pub use crate::soc::Machine;
