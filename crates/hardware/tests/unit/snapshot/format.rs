//! # Checkpoint Format Tests
//!
//! Field order, padding, and the blocks whose presence depends on the hart.

use rstest::rstest;
use rvhart_core::config::HartModel;
use rvhart_core::snapshot::SNAPSHOT_FIELDS;

use super::saved;
use crate::common::harness::realized;

fn names(text: &str) -> Vec<&str> {
    text.lines()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect()
}

#[test]
fn test_header_order() {
    let hart = realized(HartModel::SifiveU54);
    let text = saved(hart.state());
    assert_eq!(&names(&text)[..SNAPSHOT_FIELDS.len()], &SNAPSHOT_FIELDS[..]);
    assert_eq!(text.lines().next(), Some("pc 0000000000001000"));
}

#[test]
fn test_register_padding() {
    let hart = realized(HartModel::SifiveE31);
    let text = saved(hart.state());
    assert_eq!(text.lines().next(), Some("pc 00001000"));
    assert!(text.contains("\nmisa 40101105\n"));
    // FPRs always use 16 digits.
    assert!(text.contains("\nf0/ft0 0000000000000000\n"));
}

#[rstest]
#[case(HartModel::SifiveU54, "features 3")]
#[case(HartModel::SifiveE51, "features 2")]
#[case(HartModel::LowriscIbex, "features 6")]
fn test_features_unpadded(#[case] model: HartModel, #[case] line: &str) {
    let text = saved(realized(model).state());
    assert!(text.lines().any(|l| l == line), "missing {line:?}");
}

#[test]
fn test_version_fields() {
    let text = saved(realized(HartModel::Any).state());
    assert!(text.contains("\npriv_ver 0000000000011100\n"));
    assert!(text.contains("\nvext_ver 0000000000000701\n"));
    assert!(!text.contains("bext"));
}

#[test]
fn test_mstatush_only_on_rv32() {
    let rv32 = saved(realized(HartModel::SifiveU34).state());
    let rv64 = saved(realized(HartModel::SifiveU54).state());
    assert_eq!(names(&rv32)[SNAPSHOT_FIELDS.len()], "mstatush");
    assert_eq!(names(&rv64)[SNAPSHOT_FIELDS.len()], "x0/zero");
    assert!(!rv64.contains("mstatush"));
}

#[rstest]
#[case(HartModel::SifiveU54, 36 + 64 + 20)]
#[case(HartModel::SifiveU34, 36 + 1 + 64 + 20)]
fn test_line_count(#[case] model: HartModel, #[case] lines: usize) {
    assert_eq!(saved(realized(model).state()).lines().count(), lines);
}

#[test]
fn test_pmp_block_layout() {
    let text = saved(realized(HartModel::SifiveU54).state());
    let n = names(&text);
    let pmp = &n[n.len() - 20..];
    assert_eq!(pmp[0], "pmpaddr_0");
    assert_eq!(pmp[15], "pmpaddr_15");
    assert_eq!(pmp[16], "pmpcfg_0");
    assert_eq!(pmp[19], "pmpcfg_3");
    assert_eq!(n[n.len() - 21], "f31/ft11");
}

#[test]
fn test_rv32_mstatus_split() {
    let mut hart = realized(HartModel::SifiveE34);
    hart.state_mut().csrs.mstatus = 0x0000_0030_0000_1888;
    let text = saved(hart.state());
    assert!(text.contains("\nmstatus 00001888\n"));
    assert!(text.contains("\nmstatush 00000030\n"));
}
