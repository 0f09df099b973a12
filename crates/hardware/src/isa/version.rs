//! Specification version tags.
//!
//! A resolved hart records which revision of the privileged, bit-manipulation
//! and vector specifications it implements. Each tag has a user-facing string
//! (the allow-list the resolver matches against) and a numeric encoding that
//! is stored in hart state and written to checkpoints.

use std::fmt;

/// Privileged architecture version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrivVersion {
    /// Privileged spec v1.10.0.
    V1_10_0,
    /// Privileged spec v1.11.0.
    #[default]
    V1_11_0,
}

impl PrivVersion {
    /// Recognized version strings.
    pub const ALLOWED: [(&'static str, Self); 2] =
        [("v1.11.0", Self::V1_11_0), ("v1.10.0", Self::V1_10_0)];

    /// Parses a version string from the allow-list.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALLOWED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|&(_, v)| v)
    }

    /// Numeric encoding stored in hart state.
    pub const fn encoding(self) -> u64 {
        match self {
            Self::V1_10_0 => 0x0001_1000,
            Self::V1_11_0 => 0x0001_1100,
        }
    }

    /// Decodes a stored encoding.
    pub const fn from_encoding(value: u64) -> Option<Self> {
        match value {
            0x0001_1000 => Some(Self::V1_10_0),
            0x0001_1100 => Some(Self::V1_11_0),
            _ => None,
        }
    }

    /// The version string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::V1_10_0 => "v1.10.0",
            Self::V1_11_0 => "v1.11.0",
        }
    }
}

/// Bit-manipulation extension version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BextVersion {
    /// Draft v0.93.
    #[default]
    V0_93,
}

impl BextVersion {
    /// Recognized version strings.
    pub const ALLOWED: [(&'static str, Self); 1] = [("v0.93", Self::V0_93)];

    /// Parses a version string from the allow-list.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALLOWED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|&(_, v)| v)
    }

    /// Numeric encoding stored in hart state.
    pub const fn encoding(self) -> u64 {
        match self {
            Self::V0_93 => 0x0000_9300,
        }
    }

    /// Decodes a stored encoding.
    pub const fn from_encoding(value: u64) -> Option<Self> {
        match value {
            0x0000_9300 => Some(Self::V0_93),
            _ => None,
        }
    }

    /// The version string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::V0_93 => "v0.93",
        }
    }
}

/// Vector extension version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VextVersion {
    /// Draft v0.7.1.
    #[default]
    V0_7_1,
}

impl VextVersion {
    /// Recognized version strings.
    pub const ALLOWED: [(&'static str, Self); 1] = [("v0.7.1", Self::V0_7_1)];

    /// Parses a version string from the allow-list.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALLOWED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|&(_, v)| v)
    }

    /// Numeric encoding stored in hart state.
    pub const fn encoding(self) -> u64 {
        match self {
            Self::V0_7_1 => 0x0000_0701,
        }
    }

    /// Decodes a stored encoding.
    pub const fn from_encoding(value: u64) -> Option<Self> {
        match value {
            0x0000_0701 => Some(Self::V0_7_1),
            _ => None,
        }
    }

    /// The version string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::V0_7_1 => "v0.7.1",
        }
    }
}

impl fmt::Display for PrivVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for VextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
