//! # Dump Tests
//!
//! Layout of the human-readable register dump.

use rvhart_core::config::HartModel;
use rvhart_core::core::dump::HartDump;
use rvhart_core::core::{Hart, NullEngine};

use crate::common::harness::realized;

#[test]
fn test_dump_rv64_header_lines() {
    let mut hart = realized(HartModel::SifiveU54);
    hart.state_mut().csrs.mscratch = 0xdead_beef;
    let text = HartDump::new(hart.state()).to_string();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(" pc       0000000000001000"));
    assert_eq!(lines.next(), Some(" mhartid  0000000000000000"));
    assert!(text.contains(" mscratch 00000000deadbeef\n"));
    assert!(!text.contains("mstatush"));
    assert!(!text.contains(" V "));
}

#[test]
fn test_dump_groups_gprs_four_per_line() {
    let mut hart = realized(HartModel::SifiveE31);
    hart.state_mut().gpr.write(1, 0x10);
    let text = HartDump::new(hart.state()).to_string();
    assert!(text.contains(" x0/zero 00000000 x1/ra   00000010 x2/sp   00000000 x3/gp   00000000\n"));
    assert!(text.contains(" mstatush 00000000\n"));
}

#[test]
fn test_dump_fpu_is_optional() {
    let hart = realized(HartModel::SifiveU54);
    let plain = HartDump::new(hart.state()).to_string();
    let full = HartDump::new(hart.state()).with_fpu(true).to_string();
    assert!(!plain.contains("f0/ft0"));
    assert!(full.contains(" f0/ft0   0000000000000000"));
    assert!(full.contains("f31/ft11"));
}

#[test]
fn test_dump_pmp_block() {
    let hart = realized(HartModel::SifiveU54);
    let text = HartDump::new(hart.state()).to_string();
    assert!(text.contains("pmpaddr_15 0\n"));
    assert!(text.contains("pmpcfg_3 0\n"));
    assert!(text.ends_with("pmprules 0\n"));
}

#[test]
fn test_dump_virtualization_line() {
    let mut hart = Hart::from_model(0, HartModel::Rv64);
    hart.configure(|cfg| cfg.ext_h = true).unwrap();
    hart.realize(&mut NullEngine).unwrap();
    let text = HartDump::new(hart.state()).to_string();
    assert!(text.starts_with(" V        = 0\n"));
}
