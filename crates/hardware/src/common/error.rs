//! Hart error definitions.
//!
//! This module defines the error taxonomy of the hart model. It provides:
//! 1. **Configuration Errors:** Rejected extension combinations, versions and vector parameters.
//! 2. **Checkpoint Errors:** Failures while reading or writing a register-file snapshot.
//! 3. **Lifecycle Errors:** Operations issued in the wrong lifecycle phase.
//! 4. **Aggregation:** A crate-wide `HartError` wrapping all of the above.
//!
//! Guest protocol errors (bad writes to MMIO devices) are not represented here:
//! they are logged under the `guest_error` target and otherwise ignored.

use thiserror::Error;

use crate::core::hart::Phase;

/// Errors detected while turning a hart configuration into an ISA descriptor.
///
/// These are fatal to the hart being constructed: a hart whose realization
/// fails never becomes runnable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Both base integer variants were requested.
    #[error("I and E extensions are incompatible")]
    IncompatibleBase,

    /// Neither base integer variant was requested.
    #[error("Either I or E extension must be set")]
    MissingBase,

    /// A version string is not on the allow-list for its option.
    #[error("Unsupported {option} version '{value}'")]
    UnsupportedVersion {
        /// Option name (`priv_spec`, `bext_spec`, `vext_spec`).
        option: &'static str,
        /// Offending value.
        value: String,
    },

    /// A vector length parameter is not a power of two.
    #[error("Vector extension {option} must be power of 2, got {value}")]
    VectorNotPowerOfTwo {
        /// Option name (`vlen` or `elen`).
        option: &'static str,
        /// Offending value.
        value: u16,
    },

    /// A vector length parameter is outside the supported range.
    #[error("Vector extension implementation only supports {option} in the range [{min}, {max}], got {value}")]
    VectorOutOfRange {
        /// Option name (`vlen` or `elen`).
        option: &'static str,
        /// Offending value.
        value: u16,
        /// Inclusive lower bound.
        min: u16,
        /// Inclusive upper bound.
        max: u16,
    },

    /// The requested base width cannot back a hart register file.
    #[error("Unsupported base width rv{0}")]
    UnsupportedXlen(u32),

    /// A hart model name did not match any preset.
    #[error("Unknown hart model '{0}'")]
    UnknownModel(String),

    /// Configuration JSON could not be parsed.
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while saving or restoring a checkpoint.
///
/// A failed restore leaves every field before `field` applied and every
/// field after it untouched. The hart must be re-initialized, not resumed.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The snapshot stream could not be read or written.
    #[error("Checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the named field.
    #[error("failed to read {field}: snapshot ends early")]
    MissingField {
        /// Field whose line was expected.
        field: String,
    },

    /// The line for the named field is out of order or unparsable.
    #[error("failed to read {field}: malformed line '{line}'")]
    Malformed {
        /// Field whose line was expected.
        field: String,
        /// The offending line, trimmed.
        line: String,
    },

    /// The line parsed but its value cannot be represented.
    #[error("failed to read {field}: invalid value {value:#x}")]
    InvalidValue {
        /// Field whose value was rejected.
        field: String,
        /// Parsed value.
        value: u64,
    },
}

impl CheckpointError {
    /// Returns the name of the field that failed, if the failure is field-specific.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Io(_) => None,
            Self::MissingField { field }
            | Self::Malformed { field, .. }
            | Self::InvalidValue { field, .. } => Some(field.as_str()),
        }
    }
}

/// Errors raised when a lifecycle operation does not fit the hart's current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// `operation` is not permitted while the hart is in phase `from`.
    #[error("cannot {operation} a hart in phase {from}")]
    InvalidTransition {
        /// Phase the hart was in.
        from: Phase,
        /// Operation that was attempted.
        operation: &'static str,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum HartError {
    /// Configuration or realization failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Checkpoint save or restore failure.
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    /// Lifecycle ordering violation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Result alias used by hart operations.
pub type Result<T> = std::result::Result<T, HartError>;
