//! Configuration system for the hart model.
//!
//! This module defines the configuration structures used to parameterize a hart
//! and the machine that hosts it. It provides:
//! 1. **Defaults:** Baseline option values (extension toggles, vector lengths, reset vector).
//! 2. **Structures:** `HartConfig` (the requested ISA profile), overrides, and the root `Config`.
//! 3. **Presets:** `HartModel`, a closed set of named hart models each fixing a baseline profile.
//!
//! Configuration is supplied as JSON or built in code from `HartModel::config()`.
//! No validation happens here; the extension resolver checks everything once, at realize time.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::DEFAULT_RESETVEC;
use crate::isa::Xlen;

/// Default configuration constants for the hart model.
mod defaults {
    /// Default vector register length in bits.
    pub const VLEN: u16 = 128;

    /// Default vector element length in bits.
    pub const ELEN: u16 = 64;

    /// Default number of harts in a machine.
    pub const NUM_HARTS: usize = 1;

    /// Base address of the test-finisher MMIO block.
    pub const FINISHER_BASE: u64 = 0x0010_0000;
}

/// Requested ISA profile of a single hart.
///
/// Immutable once the hart is realized. Every flag maps onto one `misa`
/// extension letter except `ext_g`, which stands for IMAFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HartConfig {
    /// Base register width.
    pub xlen: Xlen,
    /// Base integer ISA.
    pub ext_i: bool,
    /// Reduced base integer ISA.
    pub ext_e: bool,
    /// Aggregate general-purpose profile (IMAFD).
    pub ext_g: bool,
    /// Integer multiply/divide.
    pub ext_m: bool,
    /// Atomics.
    pub ext_a: bool,
    /// Single-precision floating point.
    pub ext_f: bool,
    /// Double-precision floating point.
    pub ext_d: bool,
    /// Compressed instructions.
    pub ext_c: bool,
    /// Supervisor mode.
    pub ext_s: bool,
    /// User mode.
    pub ext_u: bool,
    /// Bit manipulation (experimental).
    pub ext_b: bool,
    /// Hypervisor (experimental).
    pub ext_h: bool,
    /// Vector (experimental).
    pub ext_v: bool,
    /// Privileged spec version string; `None` selects the default.
    pub priv_spec: Option<String>,
    /// Bit-manipulation spec version string; `None` selects the default.
    pub bext_spec: Option<String>,
    /// Vector spec version string; `None` selects the default.
    pub vext_spec: Option<String>,
    /// Vector register length in bits.
    pub vlen: u16,
    /// Vector element length in bits.
    pub elen: u16,
    /// Address translation present.
    pub mmu: bool,
    /// Physical memory protection present.
    pub pmp: bool,
    /// Enhanced PMP; only honoured when `pmp` is set.
    pub epmp: bool,
    /// Address the program counter takes on reset.
    pub resetvec: u64,
}

impl Default for HartConfig {
    /// Generic 64-bit profile: IMAFDCSU with G set, no experimental extensions.
    fn default() -> Self {
        Self {
            xlen: Xlen::Rv64,
            ext_i: true,
            ext_e: false,
            ext_g: true,
            ext_m: true,
            ext_a: true,
            ext_f: true,
            ext_d: true,
            ext_c: true,
            ext_s: true,
            ext_u: true,
            ext_b: false,
            ext_h: false,
            ext_v: false,
            priv_spec: None,
            bext_spec: None,
            vext_spec: None,
            vlen: defaults::VLEN,
            elen: defaults::ELEN,
            mmu: true,
            pmp: true,
            epmp: false,
            resetvec: DEFAULT_RESETVEC,
        }
    }
}

impl HartConfig {
    /// Profile with every single-letter extension off, for presets to build on.
    fn bare(xlen: Xlen) -> Self {
        Self {
            xlen,
            ext_i: false,
            ext_g: false,
            ext_m: false,
            ext_a: false,
            ext_f: false,
            ext_d: false,
            ext_c: false,
            ext_s: false,
            ext_u: false,
            ..Self::default()
        }
    }
}

/// Named hart models.
///
/// Each model fixes a baseline `HartConfig`; callers may still override
/// individual options before realize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HartModel {
    /// Permissive RV64 IMAFDCU hart.
    #[default]
    Any,
    /// Generic 32-bit hart built purely from option defaults.
    Rv32,
    /// Generic 64-bit hart built purely from option defaults.
    Rv64,
    /// lowRISC Ibex: RV32 IMCU, no MMU, enhanced PMP.
    LowriscIbex,
    /// SiFive E31: RV32 IMACU, no MMU.
    SifiveE31,
    /// SiFive E34: RV32 IMAFCU, no MMU.
    SifiveE34,
    /// SiFive U34: RV32 IMAFDCSU.
    SifiveU34,
    /// SiFive E51: RV64 IMACU, no MMU.
    SifiveE51,
    /// SiFive U54: RV64 IMAFDCSU.
    SifiveU54,
    /// Shakti C-class: RV64 IMAFDCSU.
    ShaktiC,
}

impl HartModel {
    /// Every model, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Any,
        Self::Rv32,
        Self::Rv64,
        Self::LowriscIbex,
        Self::SifiveE31,
        Self::SifiveE34,
        Self::SifiveU34,
        Self::SifiveE51,
        Self::SifiveU54,
        Self::ShaktiC,
    ];

    /// Model name as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Rv32 => "rv32",
            Self::Rv64 => "rv64",
            Self::LowriscIbex => "lowrisc-ibex",
            Self::SifiveE31 => "sifive-e31",
            Self::SifiveE34 => "sifive-e34",
            Self::SifiveU34 => "sifive-u34",
            Self::SifiveE51 => "sifive-e51",
            Self::SifiveU54 => "sifive-u54",
            Self::ShaktiC => "shakti-c",
        }
    }

    /// Model names sorted alphabetically.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = Self::ALL.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names
    }

    /// Baseline configuration for this model.
    pub fn config(self) -> HartConfig {
        let v1_10 = Some("v1.10.0".to_string());
        match self {
            Self::Any => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_f: true,
                ext_d: true,
                ext_c: true,
                ext_u: true,
                priv_spec: Some("v1.11.0".to_string()),
                ..HartConfig::bare(Xlen::Rv64)
            },
            Self::Rv32 => HartConfig {
                xlen: Xlen::Rv32,
                ..HartConfig::default()
            },
            Self::Rv64 => HartConfig::default(),
            Self::LowriscIbex => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_c: true,
                ext_u: true,
                priv_spec: v1_10,
                mmu: false,
                epmp: true,
                ..HartConfig::bare(Xlen::Rv32)
            },
            Self::SifiveE31 => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_c: true,
                ext_u: true,
                priv_spec: v1_10,
                mmu: false,
                ..HartConfig::bare(Xlen::Rv32)
            },
            Self::SifiveE34 => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_f: true,
                ext_c: true,
                ext_u: true,
                priv_spec: v1_10,
                mmu: false,
                resetvec: DEFAULT_RESETVEC,
                ..HartConfig::bare(Xlen::Rv32)
            },
            Self::SifiveU34 => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_f: true,
                ext_d: true,
                ext_c: true,
                ext_s: true,
                ext_u: true,
                priv_spec: v1_10,
                ..HartConfig::bare(Xlen::Rv32)
            },
            Self::SifiveE51 => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_c: true,
                ext_u: true,
                priv_spec: v1_10,
                mmu: false,
                ..HartConfig::bare(Xlen::Rv64)
            },
            Self::SifiveU54 | Self::ShaktiC => HartConfig {
                ext_i: true,
                ext_m: true,
                ext_a: true,
                ext_f: true,
                ext_d: true,
                ext_c: true,
                ext_s: true,
                ext_u: true,
                priv_spec: v1_10,
                ..HartConfig::bare(Xlen::Rv64)
            },
        }
    }
}

impl fmt::Display for HartModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HartModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ConfigError::UnknownModel(s.to_string()))
    }
}

/// Per-option overrides applied on top of a model's baseline.
///
/// Every field is optional; `None` keeps the baseline value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HartOverrides {
    /// Base register width.
    pub xlen: Option<Xlen>,
    /// Base integer ISA.
    pub ext_i: Option<bool>,
    /// Reduced base integer ISA.
    pub ext_e: Option<bool>,
    /// Aggregate IMAFD profile.
    pub ext_g: Option<bool>,
    /// Integer multiply/divide.
    pub ext_m: Option<bool>,
    /// Atomics.
    pub ext_a: Option<bool>,
    /// Single-precision floating point.
    pub ext_f: Option<bool>,
    /// Double-precision floating point.
    pub ext_d: Option<bool>,
    /// Compressed instructions.
    pub ext_c: Option<bool>,
    /// Supervisor mode.
    pub ext_s: Option<bool>,
    /// User mode.
    pub ext_u: Option<bool>,
    /// Bit manipulation.
    pub ext_b: Option<bool>,
    /// Hypervisor.
    pub ext_h: Option<bool>,
    /// Vector.
    pub ext_v: Option<bool>,
    /// Privileged spec version string.
    pub priv_spec: Option<String>,
    /// Bit-manipulation spec version string.
    pub bext_spec: Option<String>,
    /// Vector spec version string.
    pub vext_spec: Option<String>,
    /// Vector register length.
    pub vlen: Option<u16>,
    /// Vector element length.
    pub elen: Option<u16>,
    /// Address translation present.
    pub mmu: Option<bool>,
    /// Physical memory protection present.
    pub pmp: Option<bool>,
    /// Enhanced PMP.
    pub epmp: Option<bool>,
    /// Reset vector.
    pub resetvec: Option<u64>,
}

impl HartOverrides {
    /// Writes every set override into `cfg`.
    pub fn apply(&self, cfg: &mut HartConfig) {
        fn set<T: Clone>(dst: &mut T, src: Option<&T>) {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        set(&mut cfg.xlen, self.xlen.as_ref());
        set(&mut cfg.ext_i, self.ext_i.as_ref());
        set(&mut cfg.ext_e, self.ext_e.as_ref());
        set(&mut cfg.ext_g, self.ext_g.as_ref());
        set(&mut cfg.ext_m, self.ext_m.as_ref());
        set(&mut cfg.ext_a, self.ext_a.as_ref());
        set(&mut cfg.ext_f, self.ext_f.as_ref());
        set(&mut cfg.ext_d, self.ext_d.as_ref());
        set(&mut cfg.ext_c, self.ext_c.as_ref());
        set(&mut cfg.ext_s, self.ext_s.as_ref());
        set(&mut cfg.ext_u, self.ext_u.as_ref());
        set(&mut cfg.ext_b, self.ext_b.as_ref());
        set(&mut cfg.ext_h, self.ext_h.as_ref());
        set(&mut cfg.ext_v, self.ext_v.as_ref());
        if self.priv_spec.is_some() {
            cfg.priv_spec.clone_from(&self.priv_spec);
        }
        if self.bext_spec.is_some() {
            cfg.bext_spec.clone_from(&self.bext_spec);
        }
        if self.vext_spec.is_some() {
            cfg.vext_spec.clone_from(&self.vext_spec);
        }
        set(&mut cfg.vlen, self.vlen.as_ref());
        set(&mut cfg.elen, self.elen.as_ref());
        set(&mut cfg.mmu, self.mmu.as_ref());
        set(&mut cfg.pmp, self.pmp.as_ref());
        set(&mut cfg.epmp, self.epmp.as_ref());
        set(&mut cfg.resetvec, self.resetvec.as_ref());
    }
}

/// Hart selection: a model plus overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HartSection {
    /// Baseline model.
    #[serde(default)]
    pub model: HartModel,
    /// Options overriding the model baseline.
    #[serde(flatten)]
    pub overrides: HartOverrides,
}

/// Machine-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Number of harts to build.
    #[serde(default = "SystemConfig::default_num_harts")]
    pub num_harts: usize,

    /// Base address of the test-finisher MMIO block.
    #[serde(default = "SystemConfig::default_finisher_base")]
    pub finisher_base: u64,
}

impl SystemConfig {
    /// Returns the default hart count.
    fn default_num_harts() -> usize {
        defaults::NUM_HARTS
    }

    /// Returns the default finisher base address.
    fn default_finisher_base() -> u64 {
        defaults::FINISHER_BASE
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            num_harts: defaults::NUM_HARTS,
            finisher_base: defaults::FINISHER_BASE,
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvhart_core::config::{Config, HartModel};
///
/// let json = r#"{
///     "hart": { "model": "sifive-u54", "ext_v": true, "vlen": 256 },
///     "system": { "num_harts": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.hart.model, HartModel::SifiveU54);
/// assert_eq!(config.system.num_harts, 2);
///
/// let hart = config.hart_config();
/// assert!(hart.ext_v);
/// assert_eq!(hart.vlen, 256);
/// assert!(hart.ext_s);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Hart model and option overrides.
    #[serde(default)]
    pub hart: HartSection,
    /// Machine settings.
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Configuration for a single model with no overrides.
    pub fn for_model(model: HartModel) -> Self {
        Self {
            hart: HartSection {
                model,
                overrides: HartOverrides::default(),
            },
            system: SystemConfig::default(),
        }
    }

    /// Effective hart configuration: model baseline with overrides applied.
    pub fn hart_config(&self) -> HartConfig {
        let mut cfg = self.hart.model.config();
        self.hart.overrides.apply(&mut cfg);
        cfg
    }
}
