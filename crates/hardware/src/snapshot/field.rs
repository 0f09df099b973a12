//! Header fields of the checkpoint stream.
//!
//! Each header field knows its line name, how to read it from hart state and
//! how to write a parsed value back. Values that cannot be represented in the
//! typed state (a reserved privilege level, an unknown version encoding) are
//! rejected rather than coerced.

use crate::common::CheckpointError;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::state::HartState;
use crate::isa::{Features, PrivVersion, VextVersion};

/// Header line names, in stream order.
pub const SNAPSHOT_FIELDS: [&str; 36] = [
    "pc",
    "mhartid",
    "mstatus",
    "mip",
    "mie",
    "mideleg",
    "medeleg",
    "mtvec",
    "stvec",
    "mepc",
    "sepc",
    "mcause",
    "scause",
    "mtval",
    "stval",
    "mscratch",
    "sscratch",
    "satp",
    "load_res",
    "load_val",
    "frm",
    "badaddr",
    "guest_phys_fault_addr",
    "priv_ver",
    "vext_ver",
    "misa",
    "misa_mask",
    "features",
    "priv",
    "virt",
    "resetvec",
    "scounteren",
    "mcounteren",
    "mfromhost",
    "mtohost",
    "timecmp",
];

/// Padding of a header value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// Zero-padded to the hart register width.
    Register,
    /// Minimal hex digits.
    Unpadded,
}

/// One header field. Discriminants index `SNAPSHOT_FIELDS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Pc,
    Mhartid,
    Mstatus,
    Mip,
    Mie,
    Mideleg,
    Medeleg,
    Mtvec,
    Stvec,
    Mepc,
    Sepc,
    Mcause,
    Scause,
    Mtval,
    Stval,
    Mscratch,
    Sscratch,
    Satp,
    LoadRes,
    LoadVal,
    Frm,
    Badaddr,
    GuestPhysFaultAddr,
    PrivVer,
    VextVer,
    Misa,
    MisaMask,
    Features,
    Priv,
    Virt,
    Resetvec,
    Scounteren,
    Mcounteren,
    Mfromhost,
    Mtohost,
    Timecmp,
}

impl HeaderField {
    /// Every header field, in stream order.
    pub const ALL: [Self; 36] = [
        Self::Pc,
        Self::Mhartid,
        Self::Mstatus,
        Self::Mip,
        Self::Mie,
        Self::Mideleg,
        Self::Medeleg,
        Self::Mtvec,
        Self::Stvec,
        Self::Mepc,
        Self::Sepc,
        Self::Mcause,
        Self::Scause,
        Self::Mtval,
        Self::Stval,
        Self::Mscratch,
        Self::Sscratch,
        Self::Satp,
        Self::LoadRes,
        Self::LoadVal,
        Self::Frm,
        Self::Badaddr,
        Self::GuestPhysFaultAddr,
        Self::PrivVer,
        Self::VextVer,
        Self::Misa,
        Self::MisaMask,
        Self::Features,
        Self::Priv,
        Self::Virt,
        Self::Resetvec,
        Self::Scounteren,
        Self::Mcounteren,
        Self::Mfromhost,
        Self::Mtohost,
        Self::Timecmp,
    ];

    /// Line name.
    pub const fn name(self) -> &'static str {
        SNAPSHOT_FIELDS[self as usize]
    }

    /// Padding used when saving.
    pub const fn width(self) -> Width {
        match self {
            Self::Features => Width::Unpadded,
            _ => Width::Register,
        }
    }

    /// Value of this field in `s`.
    ///
    /// On a 32-bit hart `mstatus` yields only its low word; the high word is
    /// saved separately as `mstatush`.
    pub const fn get(self, s: &HartState) -> u64 {
        let c = &s.csrs;
        match self {
            Self::Pc => s.pc,
            Self::Mhartid => s.mhartid,
            Self::Mstatus if s.is_32bit() => c.mstatus & 0xFFFF_FFFF,
            Self::Mstatus => c.mstatus,
            Self::Mip => c.mip,
            Self::Mie => c.mie,
            Self::Mideleg => c.mideleg,
            Self::Medeleg => c.medeleg,
            Self::Mtvec => c.mtvec,
            Self::Stvec => c.stvec,
            Self::Mepc => c.mepc,
            Self::Sepc => c.sepc,
            Self::Mcause => c.mcause,
            Self::Scause => c.scause,
            Self::Mtval => c.mtval,
            Self::Stval => c.stval,
            Self::Mscratch => c.mscratch,
            Self::Sscratch => c.sscratch,
            Self::Satp => c.satp,
            Self::LoadRes => s.load_res,
            Self::LoadVal => s.load_val,
            Self::Frm => s.frm,
            Self::Badaddr => s.badaddr,
            Self::GuestPhysFaultAddr => s.guest_phys_fault_addr,
            Self::PrivVer => s.priv_ver.encoding(),
            Self::VextVer => s.vext_ver.encoding(),
            Self::Misa => s.misa,
            Self::MisaMask => s.misa_mask,
            Self::Features => s.features.bits() as u64,
            Self::Priv => s.privilege.bits(),
            Self::Virt => s.virt as u64,
            Self::Resetvec => s.resetvec,
            Self::Scounteren => c.scounteren,
            Self::Mcounteren => c.mcounteren,
            Self::Mfromhost => s.mfromhost,
            Self::Mtohost => s.mtohost,
            Self::Timecmp => s.timecmp,
        }
    }

    /// Stores a parsed `value` into `s`.
    ///
    /// `mstatus` is stored whole; on a 32-bit stream its high word arrives
    /// later through `mstatush`.
    pub fn set(self, s: &mut HartState, value: u64) -> Result<(), CheckpointError> {
        let c = &mut s.csrs;
        match self {
            Self::Pc => s.pc = value,
            Self::Mhartid => s.mhartid = value,
            Self::Mstatus => c.mstatus = value,
            Self::Mip => c.mip = value,
            Self::Mie => c.mie = value,
            Self::Mideleg => c.mideleg = value,
            Self::Medeleg => c.medeleg = value,
            Self::Mtvec => c.mtvec = value,
            Self::Stvec => c.stvec = value,
            Self::Mepc => c.mepc = value,
            Self::Sepc => c.sepc = value,
            Self::Mcause => c.mcause = value,
            Self::Scause => c.scause = value,
            Self::Mtval => c.mtval = value,
            Self::Stval => c.stval = value,
            Self::Mscratch => c.mscratch = value,
            Self::Sscratch => c.sscratch = value,
            Self::Satp => c.satp = value,
            Self::LoadRes => s.load_res = value,
            Self::LoadVal => s.load_val = value,
            Self::Frm => s.frm = value,
            Self::Badaddr => s.badaddr = value,
            Self::GuestPhysFaultAddr => s.guest_phys_fault_addr = value,
            Self::PrivVer => {
                s.priv_ver = PrivVersion::from_encoding(value).ok_or_else(|| self.invalid(value))?;
            }
            Self::VextVer => {
                s.vext_ver = VextVersion::from_encoding(value).ok_or_else(|| self.invalid(value))?;
            }
            Self::Misa => s.misa = value,
            Self::MisaMask => s.misa_mask = value,
            Self::Features => {
                let bits = u32::try_from(value).map_err(|_| self.invalid(value))?;
                s.features = Features::from_bits(bits);
            }
            Self::Priv => {
                s.privilege = PrivilegeMode::from_bits(value).ok_or_else(|| self.invalid(value))?;
            }
            Self::Virt => {
                s.virt = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(self.invalid(value)),
                };
            }
            Self::Resetvec => s.resetvec = value,
            Self::Scounteren => c.scounteren = value,
            Self::Mcounteren => c.mcounteren = value,
            Self::Mfromhost => s.mfromhost = value,
            Self::Mtohost => s.mtohost = value,
            Self::Timecmp => s.timecmp = value,
        }
        Ok(())
    }

    fn invalid(self, value: u64) -> CheckpointError {
        CheckpointError::InvalidValue {
            field: self.name().to_string(),
            value,
        }
    }
}
