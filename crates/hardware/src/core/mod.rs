//! Hart core.
//!
//! This module contains the architectural register file of a hart, the
//! lifecycle that drives it from construction to execution, and a
//! human-readable dump of its state.

/// Architecture-specific components (CSRs, register files, privilege modes, PMP, traps).
pub mod arch;

/// Diagnostic dump of hart state.
pub mod dump;

/// Lifecycle state machine, execution-engine seam and reset lines.
pub mod hart;

/// Complete architectural state of a hart.
pub mod state;

pub use self::hart::{ExecutionEngine, Hart, NullEngine, Phase, ResetLine};
pub use self::state::HartState;
