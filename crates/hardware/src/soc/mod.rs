//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components around the harts: the MMIO device
//! trait, the test-finisher device, and the machine that owns a set of harts
//! and services their exit and reset requests.

/// Memory-mapped I/O device implementations.
pub mod devices;

/// Multi-hart machine.
pub mod machine;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use machine::Machine;
