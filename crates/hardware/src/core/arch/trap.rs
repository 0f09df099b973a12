//! Trap classification.
//!
//! This module names trap causes for diagnostics. It provides:
//! 1. **Name Tables:** Fixed, index-ordered names of synchronous exceptions and interrupts.
//! 2. **Lookup:** `trap_name`, which never fails and returns a sentinel out of range.
//! 3. **Trap Records:** `TrapRecord`, decoded from a raw `mcause`/`scause` value.

use std::fmt;

use crate::isa::Xlen;

/// Name returned for a cause beyond the end of its table.
pub const UNKNOWN_TRAP: &str = "(unknown)";

/// Name of table positions the architecture leaves unassigned.
pub const RESERVED_TRAP: &str = "reserved";

/// Synchronous exception names, indexed by cause code.
pub const EXCEPTION_NAMES: [&str; 24] = [
    "misaligned_fetch",
    "fault_fetch",
    "illegal_instruction",
    "breakpoint",
    "misaligned_load",
    "fault_load",
    "misaligned_store",
    "fault_store",
    "user_ecall",
    "supervisor_ecall",
    "hypervisor_ecall",
    "machine_ecall",
    "exec_page_fault",
    "load_page_fault",
    RESERVED_TRAP,
    "store_page_fault",
    RESERVED_TRAP,
    RESERVED_TRAP,
    RESERVED_TRAP,
    RESERVED_TRAP,
    "guest_exec_page_fault",
    "guest_load_page_fault",
    RESERVED_TRAP,
    "guest_store_page_fault",
];

/// Interrupt names, indexed by cause code.
pub const INTERRUPT_NAMES: [&str; 16] = [
    "u_software",
    "s_software",
    "vs_software",
    "m_software",
    "u_timer",
    "s_timer",
    "vs_timer",
    "m_timer",
    "u_external",
    "s_external",
    "vs_external",
    "m_external",
    RESERVED_TRAP,
    RESERVED_TRAP,
    RESERVED_TRAP,
    RESERVED_TRAP,
];

/// Returns the diagnostic name of a trap cause.
///
/// # Arguments
///
/// * `cause` - Cause code without the interrupt bit.
/// * `is_async` - True for interrupts, false for synchronous exceptions.
///
/// # Returns
///
/// The table entry, `"reserved"` for unassigned positions, or `"(unknown)"`
/// past the end of the table.
pub fn trap_name(cause: u64, is_async: bool) -> &'static str {
    let table: &[&'static str] = if is_async {
        &INTERRUPT_NAMES
    } else {
        &EXCEPTION_NAMES
    };
    usize::try_from(cause)
        .ok()
        .and_then(|i| table.get(i).copied())
        .unwrap_or(UNKNOWN_TRAP)
}

/// A trap cause paired with its synchronous/asynchronous flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrapRecord {
    /// Cause code without the interrupt bit.
    pub cause: u64,
    /// True for interrupts.
    pub is_async: bool,
}

impl TrapRecord {
    /// Creates a synchronous exception record.
    pub const fn exception(cause: u64) -> Self {
        Self {
            cause,
            is_async: false,
        }
    }

    /// Creates an interrupt record.
    pub const fn interrupt(cause: u64) -> Self {
        Self {
            cause,
            is_async: true,
        }
    }

    /// Decodes a raw cause register value of a hart of width `xlen`.
    ///
    /// The interrupt flag is the top bit of the register; the cause code is
    /// every bit below it.
    pub const fn from_cause_register(value: u64, xlen: Xlen) -> Self {
        let top = match xlen {
            Xlen::Rv32 => 31,
            Xlen::Rv64 | Xlen::Rv128 => 63,
        };
        let flag = 1u64 << top;
        Self {
            cause: value & (flag - 1),
            is_async: value & flag != 0,
        }
    }

    /// Diagnostic name of this trap.
    pub fn name(&self) -> &'static str {
        trap_name(self.cause, self.is_async)
    }
}

impl fmt::Display for TrapRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_async { "interrupt" } else { "exception" };
        write!(f, "{} {} ({})", kind, self.cause, self.name())
    }
}
