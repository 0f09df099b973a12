//! # Trap Classification Tests
//!
//! Name lookup for exceptions and interrupts, including the reserved and
//! out-of-range sentinels, and decoding of raw cause registers.

use proptest::prelude::*;
use rstest::rstest;
use rvhart_core::core::arch::trap::*;
use rvhart_core::isa::Xlen;
use rvhart_core::isa::privileged::cause::{exception, interrupt};

#[rstest]
#[case(exception::ILLEGAL_INSTRUCTION, "illegal_instruction")]
#[case(exception::ENVIRONMENT_CALL_FROM_M_MODE, "machine_ecall")]
#[case(exception::STORE_PAGE_FAULT, "store_page_fault")]
#[case(exception::INSTRUCTION_GUEST_PAGE_FAULT, "guest_exec_page_fault")]
#[case(exception::STORE_GUEST_PAGE_FAULT, "guest_store_page_fault")]
fn test_exception_names(#[case] cause: u64, #[case] name: &str) {
    assert_eq!(trap_name(cause, false), name);
}

#[rstest]
#[case(interrupt::SUPERVISOR_SOFTWARE, "s_software")]
#[case(interrupt::VIRTUAL_SUPERVISOR_TIMER, "vs_timer")]
#[case(interrupt::MACHINE_TIMER, "m_timer")]
#[case(interrupt::MACHINE_EXTERNAL, "m_external")]
fn test_interrupt_names(#[case] cause: u64, #[case] name: &str) {
    assert_eq!(trap_name(cause, true), name);
}

#[test]
fn test_reserved_positions() {
    for cause in [14, 16, 17, 18, 19, 22] {
        assert_eq!(trap_name(cause, false), RESERVED_TRAP);
    }
    for cause in 12..16 {
        assert_eq!(trap_name(cause, true), RESERVED_TRAP);
    }
}

#[test]
fn test_out_of_range_is_unknown() {
    assert_eq!(trap_name(24, false), UNKNOWN_TRAP);
    assert_eq!(trap_name(16, true), UNKNOWN_TRAP);
    assert_eq!(trap_name(u64::MAX, false), "(unknown)");
}

#[test]
fn test_same_code_differs_by_kind() {
    assert_eq!(trap_name(7, false), "fault_store");
    assert_eq!(trap_name(7, true), "m_timer");
}

#[test]
fn test_cause_register_decoding() {
    let rec = TrapRecord::from_cause_register(0x8000_0000_0000_0007, Xlen::Rv64);
    assert_eq!(rec, TrapRecord::interrupt(7));
    assert_eq!(rec.name(), "m_timer");

    let rec = TrapRecord::from_cause_register(0x8000_000b, Xlen::Rv32);
    assert_eq!(rec, TrapRecord::interrupt(11));

    // Bit 31 is an ordinary cause bit on a 64-bit hart.
    let rec = TrapRecord::from_cause_register(0x8000_000b, Xlen::Rv64);
    assert!(!rec.is_async);
    assert_eq!(rec.name(), UNKNOWN_TRAP);
}

#[test]
fn test_trap_record_display() {
    assert_eq!(
        TrapRecord::exception(2).to_string(),
        "exception 2 (illegal_instruction)"
    );
    assert_eq!(TrapRecord::interrupt(9).to_string(), "interrupt 9 (s_external)");
}

proptest! {
    #[test]
    fn trap_name_never_panics(cause in any::<u64>(), is_async in any::<bool>()) {
        let name = trap_name(cause, is_async);
        prop_assert!(!name.is_empty());
        let len = if is_async { INTERRUPT_NAMES.len() } else { EXCEPTION_NAMES.len() };
        if cause >= len as u64 {
            prop_assert_eq!(name, UNKNOWN_TRAP);
        }
    }
}
