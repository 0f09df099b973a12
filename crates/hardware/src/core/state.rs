//! Architectural state of a hart.
//!
//! `HartState` is the full register file the lifecycle, the checkpoint codec
//! and the external execution engine operate on. It provides:
//! 1. **Registers:** PC, integer and floating-point files, CSRs and PMP.
//! 2. **Identity:** `misa`, version tags and feature bits copied from the resolved ISA.
//! 3. **Queries:** Width and extension tests, and the wait-for-interrupt wake condition.

use crate::common::constants::RESERVATION_INVALID;
use crate::core::arch::csr::Csrs;
use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::pmp::PmpState;
use crate::isa::extensions::{self, Xlen};
use crate::isa::{BextVersion, Features, IsaDescriptor, PrivVersion, VextVersion};

/// Complete architectural state of one hart.
///
/// Owned by exactly one hart. Registers are stored at 64-bit width; on a
/// 32-bit hart the upper halves stay clear except for `mstatus`, whose upper
/// word is the `mstatush` view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HartState {
    /// Program counter.
    pub pc: u64,
    /// Hart identifier.
    pub mhartid: u64,
    /// Control and status registers.
    pub csrs: Csrs,
    /// Integer registers.
    pub gpr: Gpr,
    /// Floating-point registers.
    pub fpr: Fpr,
    /// Reserved address of the last load-reserved; `RESERVATION_INVALID` when none.
    pub load_res: u64,
    /// Value observed by the last load-reserved.
    pub load_val: u64,
    /// Floating-point rounding mode.
    pub frm: u64,
    /// Faulting address of the last memory trap.
    pub badaddr: u64,
    /// Guest-physical address of the last guest page fault.
    pub guest_phys_fault_addr: u64,
    /// Privileged spec version.
    pub priv_ver: PrivVersion,
    /// Bit-manipulation spec version.
    pub bext_ver: BextVersion,
    /// Vector spec version.
    pub vext_ver: VextVersion,
    /// ISA register.
    pub misa: u64,
    /// Writable bits of `misa`.
    pub misa_mask: u64,
    /// Optional hardware features.
    pub features: Features,
    /// Current privilege mode.
    pub privilege: PrivilegeMode,
    /// Virtualization mode.
    pub virt: bool,
    /// Address the PC takes on reset.
    pub resetvec: u64,
    /// Host-to-target communication register.
    pub mfromhost: u64,
    /// Target-to-host communication register.
    pub mtohost: u64,
    /// Timer compare value.
    pub timecmp: u64,
    /// Physical memory protection registers.
    pub pmp: PmpState,
    /// Two-stage address translation in progress.
    pub two_stage_lookup: bool,
    /// Exception raised but not yet taken.
    pub pending_exception: Option<u64>,
}

impl HartState {
    /// Creates the construction-time state of hart `hart_id`.
    ///
    /// Everything is zero except the hart id, the MXL field of `misa`, the
    /// reset vector and the reservation sentinel. The hart starts in machine mode.
    pub fn new(hart_id: u64, xlen: Xlen, resetvec: u64) -> Self {
        Self {
            pc: 0,
            mhartid: hart_id,
            csrs: Csrs::default(),
            gpr: Gpr::new(),
            fpr: Fpr::new(),
            load_res: RESERVATION_INVALID,
            load_val: 0,
            frm: 0,
            badaddr: 0,
            guest_phys_fault_addr: 0,
            priv_ver: PrivVersion::default(),
            bext_ver: BextVersion::default(),
            vext_ver: VextVersion::default(),
            misa: xlen.misa_mxl(),
            misa_mask: 0,
            features: Features::empty(),
            privilege: PrivilegeMode::Machine,
            virt: false,
            resetvec,
            mfromhost: 0,
            mtohost: 0,
            timecmp: 0,
            pmp: PmpState::new(),
            two_stage_lookup: false,
            pending_exception: None,
        }
    }

    /// Copies the identity of a resolved ISA into this state.
    pub const fn apply_descriptor(&mut self, isa: &IsaDescriptor) {
        self.misa = isa.misa;
        self.misa_mask = isa.misa_mask;
        self.priv_ver = isa.priv_ver;
        self.bext_ver = isa.bext_ver;
        self.vext_ver = isa.vext_ver;
        self.features = isa.features;
    }

    /// Base width, decoded from `misa`.
    pub const fn xlen(&self) -> Xlen {
        Xlen::from_misa(self.misa)
    }

    /// True on a 32-bit hart.
    pub const fn is_32bit(&self) -> bool {
        matches!(self.xlen(), Xlen::Rv32)
    }

    /// True when `misa` contains the upper-case extension `letter`.
    pub const fn has_ext(&self, letter: u8) -> bool {
        extensions::has_ext(self.misa, letter)
    }

    /// True when the feature bit is set.
    pub const fn has_feature(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    /// Canonical ISA string of this hart.
    pub fn isa_string(&self) -> String {
        extensions::isa_string(self.misa, self.xlen())
    }

    /// True when an enabled interrupt is pending, the condition that wakes a hart from WFI.
    pub const fn has_work(&self) -> bool {
        self.csrs.mip & self.csrs.mie != 0
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }
}
