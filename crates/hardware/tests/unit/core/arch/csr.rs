//! # CSR Block Tests
//!
//! Address-based access to the CSRs held by a hart, including the split
//! view of `mstatus` through `mstatush`.

use rvhart_core::core::arch::csr::*;

#[test]
fn test_csrs_default_to_zero() {
    let csrs = Csrs::default();
    for addr in [MSTATUS, MIP, MIE, MTVEC, SATP, MSCRATCH, SCOUNTEREN] {
        assert_eq!(csrs.read(addr), Some(0));
    }
}

#[test]
fn test_csr_write_then_read() {
    let mut csrs = Csrs::default();
    assert!(csrs.write(MSCRATCH, 0x1234));
    assert!(csrs.write(STVEC, 0x8000_0100));
    assert_eq!(csrs.read(MSCRATCH), Some(0x1234));
    assert_eq!(csrs.stvec, 0x8000_0100);
}

#[test]
fn test_csr_unknown_address() {
    let mut csrs = Csrs::default();
    // mhartid and misa live in the hart state, not the CSR block.
    assert_eq!(csrs.read(0xF14), None);
    assert_eq!(csrs.read(0x301), None);
    assert!(!csrs.write(0x7c0, 1));
    assert_eq!(csrs, Csrs::default());
}

#[test]
fn test_mstatush_is_upper_word() {
    let mut csrs = Csrs::default();
    csrs.mstatus = 0x0000_0030_0000_1888;
    assert_eq!(csrs.mstatush(), 0x30);
    assert_eq!(csrs.read(MSTATUSH), Some(0x30));

    csrs.set_mstatush(0x5);
    assert_eq!(csrs.mstatus, 0x0000_0005_0000_1888);

    assert!(csrs.write(MSTATUSH, 0));
    assert_eq!(csrs.mstatus, 0x1888);
}

#[test]
fn test_mstatus_bit_layout() {
    assert_eq!(MSTATUS_MIE, 0x8);
    assert_eq!(MSTATUS_MPIE, 0x80);
    assert_eq!(MSTATUS_MPRV, 0x20000);
}
