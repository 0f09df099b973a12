//! Extension resolution.
//!
//! Turns a requested `HartConfig` into a validated `IsaDescriptor`. This is the
//! single validation pass of the hart model: nothing is checked while options
//! are being configured, and everything is checked here, once, during realize.
//!
//! The checks run in a fixed order:
//! 1. **Base Width:** 128-bit harts are rejected.
//! 2. **Privileged Version:** Matched against its allow-list.
//! 3. **Features:** MMU, PMP and enhanced PMP (the latter only with PMP).
//! 4. **Base ISA:** I and E are mutually exclusive, one is required.
//! 5. **G Expansion:** G forces I, M, A, F and D on.
//! 6. **Experimental Extensions:** B and V versions, vector length bounds.

use std::fmt;

use tracing::{info, warn};

use super::extensions::{RVA, RVB, RVC, RVD, RVE, RVF, RVH, RVI, RVM, RVS, RVU, RVV, Xlen};
use super::version::{BextVersion, PrivVersion, VextVersion};
use crate::common::ConfigError;
use crate::common::constants::{ELEN_MAX, ELEN_MIN, VLEN_MAX, VLEN_MIN};
use crate::config::HartConfig;

/// Bitset of optional hardware features outside `misa`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Features(u32);

impl Features {
    /// Address translation present.
    pub const MMU: Self = Self(1 << 0);
    /// Physical memory protection present.
    pub const PMP: Self = Self(1 << 1);
    /// Enhanced PMP present.
    pub const EPMP: Self = Self(1 << 2);

    /// No features.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Builds a set from raw bits, keeping unknown bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl fmt::Debug for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (name, flag) in [("MMU", Self::MMU), ("PMP", Self::PMP), ("EPMP", Self::EPMP)] {
            if self.contains(flag) {
                let _ = set.entry(&name);
            }
        }
        set.finish()
    }
}

/// Validated ISA profile of a realized hart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsaDescriptor {
    /// Base register width.
    pub xlen: Xlen,
    /// `misa` value: MXL field plus one bit per present extension.
    pub misa: u64,
    /// Writable-bits mask of `misa`; equal to `misa` after resolution.
    pub misa_mask: u64,
    /// Privileged spec version.
    pub priv_ver: PrivVersion,
    /// Bit-manipulation spec version.
    pub bext_ver: BextVersion,
    /// Vector spec version.
    pub vext_ver: VextVersion,
    /// Optional hardware features.
    pub features: Features,
    /// Vector register length in bits.
    pub vlen: u16,
    /// Vector element length in bits.
    pub elen: u16,
}

impl IsaDescriptor {
    /// Canonical ISA string, e.g. `rv64imafdcsu`.
    pub fn isa_string(&self) -> String {
        super::extensions::isa_string(self.misa, self.xlen)
    }

    /// True when `misa` contains the upper-case extension `letter`.
    pub const fn has_ext(&self, letter: u8) -> bool {
        super::extensions::has_ext(self.misa, letter)
    }
}

/// Resolves `config` at base width `xlen` into an ISA descriptor.
///
/// # Arguments
///
/// * `config` - The requested options.
/// * `xlen` - Base width the hart is being built at.
///
/// # Returns
///
/// The descriptor, or the first `ConfigError` encountered. The error names the
/// option and the offending value where one exists.
pub fn resolve(config: &HartConfig, xlen: Xlen) -> Result<IsaDescriptor, ConfigError> {
    if xlen == Xlen::Rv128 {
        return Err(ConfigError::UnsupportedXlen(xlen.bits()));
    }

    let priv_ver = match config.priv_spec.as_deref() {
        Some(s) => PrivVersion::parse(s).ok_or_else(|| ConfigError::UnsupportedVersion {
            option: "priv_spec",
            value: s.to_string(),
        })?,
        None => PrivVersion::default(),
    };

    let mut features = Features::empty();
    if config.mmu {
        features.insert(Features::MMU);
    }
    if config.pmp {
        features.insert(Features::PMP);
        if config.epmp {
            features.insert(Features::EPMP);
        }
    }

    if config.ext_i && config.ext_e {
        return Err(ConfigError::IncompatibleBase);
    }
    if !config.ext_i && !config.ext_e {
        return Err(ConfigError::MissingBase);
    }

    let mut ext_i = config.ext_i;
    let mut ext_m = config.ext_m;
    let mut ext_a = config.ext_a;
    let mut ext_f = config.ext_f;
    let mut ext_d = config.ext_d;
    if config.ext_g && !(ext_i && ext_m && ext_a && ext_f && ext_d) {
        warn!("Setting G will also set IMAFD");
        ext_i = true;
        ext_m = true;
        ext_a = true;
        ext_f = true;
        ext_d = true;
    }
    // G on top of E would otherwise yield both base variants.
    if ext_i && config.ext_e {
        return Err(ConfigError::IncompatibleBase);
    }

    let mut bits = 0;
    for (on, bit) in [
        (ext_i, RVI),
        (config.ext_e, RVE),
        (ext_m, RVM),
        (ext_a, RVA),
        (ext_f, RVF),
        (ext_d, RVD),
        (config.ext_c, RVC),
        (config.ext_s, RVS),
        (config.ext_u, RVU),
        (config.ext_h, RVH),
    ] {
        if on {
            bits |= bit;
        }
    }

    let mut bext_ver = BextVersion::default();
    if config.ext_b {
        bits |= RVB;
        bext_ver = match config.bext_spec.as_deref() {
            Some(s) => BextVersion::parse(s).ok_or_else(|| ConfigError::UnsupportedVersion {
                option: "bext_spec",
                value: s.to_string(),
            })?,
            None => {
                info!("bext version not specified, defaulting to {}", bext_ver);
                bext_ver
            }
        };
    }

    let mut vext_ver = VextVersion::default();
    if config.ext_v {
        bits |= RVV;
        check_vector_len("vlen", config.vlen, VLEN_MIN, VLEN_MAX)?;
        check_vector_len("elen", config.elen, ELEN_MIN, ELEN_MAX)?;
        vext_ver = match config.vext_spec.as_deref() {
            Some(s) => VextVersion::parse(s).ok_or_else(|| ConfigError::UnsupportedVersion {
                option: "vext_spec",
                value: s.to_string(),
            })?,
            None => {
                info!("vector version not specified, defaulting to {}", vext_ver);
                vext_ver
            }
        };
    }

    let misa = xlen.misa_mxl() | bits;
    Ok(IsaDescriptor {
        xlen,
        misa,
        misa_mask: misa,
        priv_ver,
        bext_ver,
        vext_ver,
        features,
        vlen: config.vlen,
        elen: config.elen,
    })
}

/// Checks one vector length parameter: power of two, then range.
fn check_vector_len(option: &'static str, value: u16, min: u16, max: u16) -> Result<(), ConfigError> {
    if !value.is_power_of_two() {
        return Err(ConfigError::VectorNotPowerOfTwo { option, value });
    }
    if !(min..=max).contains(&value) {
        return Err(ConfigError::VectorOutOfRange {
            option,
            value,
            min,
            max,
        });
    }
    Ok(())
}
