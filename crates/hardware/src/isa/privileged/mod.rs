//! Privileged Architecture Definitions.
//!
//! Defines constants for the RISC-V Privileged Specification.
//!
//! # Modules
//!
//! - `cause`: Exception and Interrupt cause codes.

/// Exception and interrupt cause code definitions.
pub mod cause;
