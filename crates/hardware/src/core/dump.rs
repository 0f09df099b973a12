//! Human-readable hart state dump.
//!
//! The dump is for people: labels are aligned, registers are grouped four per
//! line, and the PMP block ends with the active-rule count. It is not meant to
//! be parsed back; use the snapshot codec for that.

use std::fmt;

use crate::common::constants::{FPR_NAMES, GPR_NAMES, PMP_CFG_REGS, PMP_COUNT};
use crate::core::state::HartState;
use crate::isa::Features;

/// Display adapter printing a hart's registers.
#[derive(Debug, Clone, Copy)]
pub struct HartDump<'a> {
    state: &'a HartState,
    fpu: bool,
}

impl<'a> HartDump<'a> {
    /// Dump of integer and control state only.
    pub const fn new(state: &'a HartState) -> Self {
        Self { state, fpu: false }
    }

    /// Includes or omits the floating-point registers.
    #[must_use]
    pub const fn with_fpu(mut self, fpu: bool) -> Self {
        self.fpu = fpu;
        self
    }
}

impl fmt::Display for HartDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state;
        let c = &s.csrs;
        let w = s.xlen().hex_digits();
        let mask = s.xlen().value_mask();

        if s.has_ext(b'H') {
            writeln!(f, " {:<8} = {}", "V", u8::from(s.virt))?;
        }
        for (name, value) in [
            ("pc", s.pc),
            ("mhartid", s.mhartid),
            ("mstatus", c.mstatus & mask),
            ("mip", c.mip),
            ("mie", c.mie),
            ("mideleg", c.mideleg),
            ("medeleg", c.medeleg),
            ("mtvec", c.mtvec),
            ("stvec", c.stvec),
            ("mepc", c.mepc),
            ("sepc", c.sepc),
            ("mcause", c.mcause),
            ("scause", c.scause),
            ("mtval", c.mtval),
            ("stval", c.stval),
            ("mscratch", c.mscratch),
            ("sscratch", c.sscratch),
            ("satp", c.satp),
        ] {
            writeln!(f, " {name:<8} {value:0w$x}")?;
        }
        if s.is_32bit() {
            writeln!(f, " {:<8} {:0w$x}", "mstatush", c.mstatush())?;
        }

        for (i, value) in s.gpr.iter() {
            write!(f, " {:<7} {value:0w$x}", GPR_NAMES[i])?;
            if i % 4 == 3 {
                writeln!(f)?;
            }
        }

        if self.fpu {
            for (i, value) in s.fpr.iter() {
                write!(f, " {:<8} {value:016x}", FPR_NAMES[i])?;
                if i % 4 == 3 {
                    writeln!(f)?;
                }
            }
        }

        if s.has_feature(Features::PMP) {
            for i in 0..PMP_COUNT {
                writeln!(f, "pmpaddr_{i} {:x}", s.pmp.addr_csr_read(i))?;
            }
            for i in 0..PMP_CFG_REGS {
                writeln!(f, "pmpcfg_{i} {:x}", s.pmp.cfg_csr_read(i, s.xlen()))?;
            }
            writeln!(f, "pmprules {}", s.pmp.num_rules())?;
        }
        Ok(())
    }
}
