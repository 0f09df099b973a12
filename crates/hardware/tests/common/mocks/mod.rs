//! # Mocks
//!
//! Mock implementations of the collaborators a hart talks to.

/// Execution engine mocks.
pub mod engine;
