//! Control and Status Register (CSR) definitions and storage.
//!
//! This module implements the CSR block of a hart. It provides:
//! 1. **Address Definitions:** Constants for the machine and supervisor CSRs the hart keeps.
//! 2. **Field Masks:** The `mstatus` bits touched at reset.
//! 3. **Register Storage:** The `Csrs` struct holding the architectural values.
//! 4. **Access Logic:** Read and write by CSR address for the execution engine.

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine exception delegation register CSR address.
pub const MEDELEG: u32 = 0x302;

/// Machine interrupt delegation register CSR address.
pub const MIDELEG: u32 = 0x303;

/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine counter enable register CSR address.
pub const MCOUNTEREN: u32 = 0x306;

/// Upper half of `mstatus` on 32-bit harts.
pub const MSTATUSH: u32 = 0x310;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Supervisor trap vector base address register CSR address.
pub const STVEC: u32 = 0x105;

/// Supervisor counter enable register CSR address.
pub const SCOUNTEREN: u32 = 0x106;

/// Supervisor scratch register CSR address.
pub const SSCRATCH: u32 = 0x140;

/// Supervisor exception program counter CSR address.
pub const SEPC: u32 = 0x141;

/// Supervisor cause register CSR address.
pub const SCAUSE: u32 = 0x142;

/// Supervisor trap value register CSR address.
pub const STVAL: u32 = 0x143;

/// Supervisor address translation and protection register CSR address.
pub const SATP: u32 = 0x180;

/// Supervisor interrupt enable bit in `mstatus` register.
pub const MSTATUS_SIE: u64 = 1 << 1;

/// Machine interrupt enable bit in `mstatus` register.
pub const MSTATUS_MIE: u64 = 1 << 3;

/// Machine previous interrupt enable bit in `mstatus` register.
pub const MSTATUS_MPIE: u64 = 1 << 7;

/// Modify-privilege bit in `mstatus` register.
pub const MSTATUS_MPRV: u64 = 1 << 17;

/// Round-to-nearest, ties-to-even rounding mode.
pub const FRM_RNE: u64 = 0;

/// Control and Status Register file.
///
/// Holds the machine-level and supervisor-level CSRs that make up the
/// privileged state of a hart. `mstatus` is stored at full 64-bit width on
/// every hart; on 32-bit harts its upper word is what software sees as
/// `mstatush`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Csrs {
    /// Machine status register.
    pub mstatus: u64,
    /// Machine interrupt pending.
    pub mip: u64,
    /// Machine interrupt enable.
    pub mie: u64,
    /// Machine interrupt delegation.
    pub mideleg: u64,
    /// Machine exception delegation.
    pub medeleg: u64,
    /// Machine trap vector base address.
    pub mtvec: u64,
    /// Supervisor trap vector base address.
    pub stvec: u64,
    /// Machine exception program counter.
    pub mepc: u64,
    /// Supervisor exception program counter.
    pub sepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Supervisor trap cause.
    pub scause: u64,
    /// Machine trap value.
    pub mtval: u64,
    /// Supervisor trap value.
    pub stval: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Supervisor scratch register.
    pub sscratch: u64,
    /// Supervisor address translation and protection (SATP).
    pub satp: u64,
    /// Supervisor counter enable.
    pub scounteren: u64,
    /// Machine counter enable.
    pub mcounteren: u64,
}

impl Csrs {
    /// Reads a CSR value by its address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The stored value, or `None` if this block does not hold the CSR.
    /// `MSTATUSH` reads the upper word of `mstatus`.
    pub const fn read(&self, addr: u32) -> Option<u64> {
        Some(match addr {
            MSTATUS => self.mstatus,
            MSTATUSH => self.mstatus >> 32,
            MIP => self.mip,
            MIE => self.mie,
            MIDELEG => self.mideleg,
            MEDELEG => self.medeleg,
            MTVEC => self.mtvec,
            STVEC => self.stvec,
            MEPC => self.mepc,
            SEPC => self.sepc,
            MCAUSE => self.mcause,
            SCAUSE => self.scause,
            MTVAL => self.mtval,
            STVAL => self.stval,
            MSCRATCH => self.mscratch,
            SSCRATCH => self.sscratch,
            SATP => self.satp,
            SCOUNTEREN => self.scounteren,
            MCOUNTEREN => self.mcounteren,
            _ => return None,
        })
    }

    /// Writes a value to a CSR by its address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The value to write.
    ///
    /// # Returns
    ///
    /// `false` if this block does not hold the CSR; the write is dropped.
    pub const fn write(&mut self, addr: u32, val: u64) -> bool {
        match addr {
            MSTATUS => self.mstatus = val,
            MSTATUSH => self.set_mstatush(val),
            MIP => self.mip = val,
            MIE => self.mie = val,
            MIDELEG => self.mideleg = val,
            MEDELEG => self.medeleg = val,
            MTVEC => self.mtvec = val,
            STVEC => self.stvec = val,
            MEPC => self.mepc = val,
            SEPC => self.sepc = val,
            MCAUSE => self.mcause = val,
            SCAUSE => self.scause = val,
            MTVAL => self.mtval = val,
            STVAL => self.stval = val,
            MSCRATCH => self.mscratch = val,
            SSCRATCH => self.sscratch = val,
            SATP => self.satp = val,
            SCOUNTEREN => self.scounteren = val,
            MCOUNTEREN => self.mcounteren = val,
            _ => return false,
        }
        true
    }

    /// Upper word of `mstatus`, as seen through `mstatush`.
    pub const fn mstatush(&self) -> u64 {
        self.mstatus >> 32
    }

    /// Replaces the upper word of `mstatus`, keeping the lower word.
    pub const fn set_mstatush(&mut self, high: u64) {
        self.mstatus = (self.mstatus & 0xFFFF_FFFF) | (high << 32);
    }
}
