//! Common utilities and types used throughout the hart model.
//!
//! This module provides fundamental building blocks shared across all components.
//! It includes:
//! 1. **Constants:** Reset defaults, vector bounds, PMP sizing and register names.
//! 2. **Error Handling:** Configuration, checkpoint and lifecycle error types.

/// Architectural constants used throughout the hart model.
pub mod constants;

/// Error types for configuration, checkpoints and lifecycle ordering.
pub mod error;

pub use error::{CheckpointError, ConfigError, HartError, LifecycleError};
