//! Physical Memory Protection (PMP).
//!
//! This module holds the PMP sub-state of a hart: the raw `pmpaddr` and
//! `pmpcfg` registers plus a rule cache derived from them. The cache is never
//! edited directly; every register write recomputes the affected rules and
//! the active-rule count. An entry that is off, or a TOR entry whose top is not
//! above its base, has no rule and matches nothing.
//!
//! PMP supports three address-matching modes:
//! - **TOR** (Top of Range): region is `[pmpaddr[i-1], pmpaddr[i])`.
//! - **NA4**: Naturally aligned 4-byte region.
//! - **NAPOT**: Naturally aligned power-of-two region.

use tracing::warn;

use crate::common::constants::{PMP_CFG_REGS, PMP_COUNT};
use crate::core::arch::mode::PrivilegeMode;
use crate::isa::Xlen;

/// PMP address-matching mode field (bits 4:3 of pmpcfg).
const A_SHIFT: u8 = 3;
const A_MASK: u8 = 0x3;

/// PMP configuration permission bits.
const PMP_R: u8 = 1 << 0;
const PMP_W: u8 = 1 << 1;
const PMP_X: u8 = 1 << 2;
const PMP_L: u8 = 1 << 7;

/// Address matching mode extracted from pmpcfg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpAddrMatch {
    /// Entry is off.
    Off = 0,
    /// Top of Range: region is `[pmpaddr[i-1], pmpaddr[i])`.
    Tor = 1,
    /// Naturally aligned 4-byte region.
    Na4 = 2,
    /// Naturally aligned power-of-two region.
    Napot = 3,
}

impl PmpAddrMatch {
    /// Decodes the A field of a pmpcfg byte.
    pub const fn from_cfg(cfg: u8) -> Self {
        match (cfg >> A_SHIFT) & A_MASK {
            0 => Self::Off,
            1 => Self::Tor,
            2 => Self::Na4,
            _ => Self::Napot,
        }
    }
}

/// Kind of memory access being checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpAccess {
    /// Data load.
    Read,
    /// Data store or AMO.
    Write,
    /// Instruction fetch.
    Exec,
}

/// Result of a PMP permission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpResult {
    /// Access is permitted.
    Allow,
    /// Access is denied.
    Deny,
    /// No PMP entry matched while rules are active; the caller denies S/U accesses.
    NoMatch,
}

/// Decoded byte range of one entry, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PmpRule {
    /// First byte covered.
    pub start: u64,
    /// Last byte covered.
    pub end: u64,
}

/// PMP register state and derived rule cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PmpState {
    addr: [u64; PMP_COUNT],
    cfg: [u8; PMP_COUNT],
    rules: [Option<PmpRule>; PMP_COUNT],
    num_rules: usize,
}

impl PmpState {
    /// Creates a PMP state with every entry off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every register and the rule cache.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of entries whose matching mode is not off.
    pub const fn num_rules(&self) -> usize {
        self.num_rules
    }

    /// Decoded rule of entry `idx`; `None` when the entry matches nothing.
    pub fn rule(&self, idx: usize) -> Option<PmpRule> {
        self.rules.get(idx).copied().flatten()
    }

    /// Raw configuration byte of entry `idx`.
    pub fn entry_cfg(&self, idx: usize) -> u8 {
        self.cfg.get(idx).copied().unwrap_or(0)
    }

    fn is_locked(&self, idx: usize) -> bool {
        self.entry_cfg(idx) & PMP_L != 0
    }

    /// Reads `pmpaddr<idx>`; out-of-range indices read 0.
    pub fn addr_csr_read(&self, idx: usize) -> u64 {
        self.addr.get(idx).copied().unwrap_or(0)
    }

    /// Writes `pmpaddr<idx>`.
    ///
    /// The write is dropped when the entry is locked, or when the next entry
    /// is a locked TOR entry that uses this register as its base.
    pub fn addr_csr_write(&mut self, idx: usize, val: u64) {
        if idx >= PMP_COUNT {
            warn!(target: "guest_error", "pmpaddr{idx} out of range");
            return;
        }
        let next_locks = idx + 1 < PMP_COUNT
            && self.is_locked(idx + 1)
            && PmpAddrMatch::from_cfg(self.cfg[idx + 1]) == PmpAddrMatch::Tor;
        if self.is_locked(idx) || next_locks {
            warn!(target: "guest_error", "ignoring pmpaddr{idx} write: entry locked");
            return;
        }
        self.addr[idx] = val;
        self.update_rule(idx);
        if idx + 1 < PMP_COUNT {
            self.update_rule(idx + 1);
        }
        self.update_rule_count();
    }

    /// Reads packed configuration register `pmpcfg<reg>` for a hart of width `xlen`.
    ///
    /// Each register packs `xlen / 8` entry bytes starting at entry `reg * 4`.
    /// Odd registers do not exist on 64-bit harts and read as 0.
    pub fn cfg_csr_read(&self, reg: usize, xlen: Xlen) -> u64 {
        if !Self::cfg_reg_exists(reg, xlen) {
            return 0;
        }
        let per_reg = xlen.bits() as usize / 8;
        (0..per_reg).fold(0, |val, i| {
            val | (u64::from(self.entry_cfg(reg * 4 + i)) << (8 * i))
        })
    }

    /// Writes packed configuration register `pmpcfg<reg>`.
    ///
    /// Locked entries keep their byte; writes to nonexistent registers are
    /// ignored, and only a nonzero value dropped that way is reported.
    pub fn cfg_csr_write(&mut self, reg: usize, val: u64, xlen: Xlen) {
        if !Self::cfg_reg_exists(reg, xlen) {
            if val != 0 {
                warn!(target: "guest_error", "ignoring write to pmpcfg{reg} on {xlen}");
            }
            return;
        }
        let per_reg = xlen.bits() as usize / 8;
        for i in 0..per_reg {
            let idx = reg * 4 + i;
            if idx >= PMP_COUNT {
                break;
            }
            if self.is_locked(idx) {
                warn!(target: "guest_error", "ignoring pmpcfg write to locked entry {idx}");
                continue;
            }
            self.cfg[idx] = ((val >> (8 * i)) & 0xff) as u8;
            self.update_rule(idx);
        }
        self.update_rule_count();
    }

    /// Recomputes every rule range and the active-rule count.
    pub fn update_rules(&mut self) {
        for idx in 0..PMP_COUNT {
            self.update_rule(idx);
        }
        self.update_rule_count();
    }

    const fn cfg_reg_exists(reg: usize, xlen: Xlen) -> bool {
        reg < PMP_CFG_REGS && !(matches!(xlen, Xlen::Rv64 | Xlen::Rv128) && reg % 2 == 1)
    }

    fn update_rule(&mut self, idx: usize) {
        let addr = self.addr[idx];
        self.rules[idx] = match PmpAddrMatch::from_cfg(self.cfg[idx]) {
            PmpAddrMatch::Off => None,
            PmpAddrMatch::Tor => {
                let start = if idx == 0 { 0 } else { self.addr[idx - 1] << 2 };
                let top = addr << 2;
                (top > start).then(|| PmpRule {
                    start,
                    end: top - 1,
                })
            }
            PmpAddrMatch::Na4 => {
                let start = addr << 2;
                Some(PmpRule {
                    start,
                    end: start.wrapping_add(3),
                })
            }
            PmpAddrMatch::Napot => Some(Self::napot_rule(addr)),
        };
    }

    fn update_rule_count(&mut self) {
        self.num_rules = self
            .cfg
            .iter()
            .filter(|&&c| PmpAddrMatch::from_cfg(c) != PmpAddrMatch::Off)
            .count();
    }

    /// Decodes a NAPOT address: the trailing ones select the region size.
    fn napot_rule(addr: u64) -> PmpRule {
        if addr == u64::MAX {
            return PmpRule {
                start: 0,
                end: u64::MAX,
            };
        }
        let trailing = (!addr).trailing_zeros();
        let base = (addr & !((1u64 << trailing) - 1)) << 2;
        let size_mask = if trailing + 3 >= 64 {
            u64::MAX
        } else {
            (1u64 << (trailing + 3)) - 1
        };
        PmpRule {
            start: base,
            end: base.wrapping_add(size_mask),
        }
    }

    /// Checks an access of `size` bytes at `addr` against the rule cache.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical byte address of the access.
    /// * `size` - Number of bytes being accessed (at least 1).
    /// * `access` - Kind of access.
    /// * `mode` - Effective privilege mode of the access.
    ///
    /// # Returns
    ///
    /// The lowest-numbered matching entry decides. An access that only partly
    /// overlaps an entry is denied. Machine mode bypasses unlocked entries and
    /// is allowed when nothing matches. With no active rules everything is allowed.
    pub fn check(&self, addr: u64, size: u64, access: PmpAccess, mode: PrivilegeMode) -> PmpResult {
        if self.num_rules == 0 {
            return PmpResult::Allow;
        }
        let last = addr.saturating_add(size.max(1) - 1);
        let machine = mode == PrivilegeMode::Machine;

        for idx in 0..PMP_COUNT {
            let Some(rule) = self.rules[idx] else {
                continue;
            };
            let first_in = (rule.start..=rule.end).contains(&addr);
            let last_in = (rule.start..=rule.end).contains(&last);
            if !first_in && !last_in {
                continue;
            }
            if first_in != last_in {
                return PmpResult::Deny;
            }
            let cfg = self.cfg[idx];
            if machine && cfg & PMP_L == 0 {
                return PmpResult::Allow;
            }
            let bit = match access {
                PmpAccess::Read => PMP_R,
                PmpAccess::Write => PMP_W,
                PmpAccess::Exec => PMP_X,
            };
            return if cfg & bit != 0 {
                PmpResult::Allow
            } else {
                PmpResult::Deny
            };
        }

        if machine {
            PmpResult::Allow
        } else {
            PmpResult::NoMatch
        }
    }
}
