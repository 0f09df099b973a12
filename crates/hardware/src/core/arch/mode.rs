//! RISC-V Privilege Modes.
//!
//! This module defines the privilege levels a hart can execute in.
//! It implements the following:
//! 1. **Mode Classification:** Definitions for User (U), Supervisor (S), and Machine (M) modes.
//! 2. **Conversion:** Checked conversion from the numeric encoding stored in checkpoints.
//! 3. **Observability:** Human-readable naming and display formatting for privilege states.

/// RISC-V privilege mode levels.
///
/// Machine mode is the highest privilege level and the mode every hart
/// resets into. Encoding 2 is reserved and has no variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeMode {
    /// User mode (U-mode).
    User = 0,

    /// Supervisor mode (S-mode).
    Supervisor = 1,

    /// Machine mode (M-mode).
    #[default]
    Machine = 3,
}

impl PrivilegeMode {
    /// Converts a numeric privilege level to a mode.
    ///
    /// # Returns
    ///
    /// `None` for the reserved encoding 2 and for anything above 3.
    pub const fn from_bits(val: u64) -> Option<Self> {
        match val {
            0 => Some(Self::User),
            1 => Some(Self::Supervisor),
            3 => Some(Self::Machine),
            _ => None,
        }
    }

    /// Numeric privilege level.
    pub const fn bits(self) -> u64 {
        self as u64
    }

    /// Returns the human-readable name of the privilege mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
