//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the extension model of a hart: which single-letter extensions
//! exist, which specification revisions are supported, and how a requested
//! configuration is validated into a resolved profile.
//!
//! # Modules
//!
//! * `extensions`: `misa` bits, base width and the canonical ISA string.
//! * `version`: Privileged, bit-manipulation and vector version tags.
//! * `resolve`: The extension resolver producing an `IsaDescriptor`.
//! * `privileged`: Privileged architecture definitions (trap causes).

/// Extension letters, `misa` bits and the ISA identity string.
pub mod extensions;

/// Privileged architecture definitions (trap causes).
pub mod privileged;

/// Configuration validation into a resolved ISA descriptor.
pub mod resolve;

/// Specification version tags and their allow-lists.
pub mod version;

pub use extensions::{Xlen, isa_string};
pub use resolve::{Features, IsaDescriptor, resolve};
pub use version::{BextVersion, PrivVersion, VextVersion};
