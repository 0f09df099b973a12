//! # Partial Restore Tests
//!
//! A restore stops at the first missing, malformed or unrepresentable line.
//! Fields before that line are applied, fields after it keep their values,
//! and the error names the failing field.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvhart_core::common::CheckpointError;
use rvhart_core::config::HartModel;
use rvhart_core::core::arch::fpr::Fpr;
use rvhart_core::snapshot;

use super::saved;
use crate::common::harness::{realized, scribble};

/// Replaces the line named `name` in `text`.
fn with_line(text: &str, name: &str, replacement: &str) -> String {
    text.lines()
        .map(|l| {
            if l.split_whitespace().next() == Some(name) {
                replacement
            } else {
                l
            }
        })
        .map(|l| format!("{l}\n"))
        .collect()
}

#[test]
fn test_truncated_after_gprs() {
    let mut source = realized(HartModel::SifiveU54);
    scribble(source.state_mut(), 21);
    let text: String = saved(source.state())
        .lines()
        .take(36 + 32)
        .map(|l| format!("{l}\n"))
        .collect();

    let mut target = realized(HartModel::SifiveU54);
    target.state_mut().fpr.write(3, 0x3ff0_0000_0000_0000);
    let before_fpr = target.state().fpr.clone();

    let err = snapshot::restore(target.state_mut(), text.as_bytes()).unwrap_err();
    assert!(matches!(err, CheckpointError::MissingField { ref field } if field == "f0/ft0"));
    assert_eq!(err.field(), Some("f0/ft0"));

    let s = target.state();
    assert_eq!(s.pc, source.state().pc);
    assert_eq!(s.csrs, source.state().csrs);
    assert_eq!(s.gpr, source.state().gpr);
    assert_eq!(s.fpr, before_fpr);
    assert_ne!(s.fpr, Fpr::new());
}

#[test]
fn test_empty_stream() {
    let mut target = realized(HartModel::Rv64);
    let before = target.state().clone();
    let err = snapshot::restore(target.state_mut(), &b""[..]).unwrap_err();
    assert_eq!(err.field(), Some("pc"));
    assert_eq!(target.state(), &before);
}

#[test]
fn test_out_of_order_lines() {
    let source = realized(HartModel::Rv64);
    let text = saved(source.state());
    let mut lines: Vec<&str> = text.lines().collect();
    lines.swap(0, 1);
    let swapped = lines.join("\n");

    let mut target = realized(HartModel::Rv64);
    match snapshot::restore(target.state_mut(), swapped.as_bytes()) {
        Err(CheckpointError::Malformed { field, line }) => {
            assert_eq!(field, "pc");
            assert_eq!(line, "mhartid 0000000000000000");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[rstest]
#[case("mip", "mip")]
#[case("mip", "mip zz")]
#[case("mip", "mip 1 2")]
#[case("x5/t0", "x5 0")]
#[case("pmpcfg_2", "pmpcfg_2 -1")]
fn test_malformed_line(#[case] field: &str, #[case] replacement: &str) {
    let text = with_line(&saved(realized(HartModel::SifiveU54).state()), field, replacement);
    let mut target = realized(HartModel::SifiveU54);
    let err = snapshot::restore(target.state_mut(), text.as_bytes()).unwrap_err();
    assert!(matches!(err, CheckpointError::Malformed { .. }));
    assert_eq!(err.field(), Some(field));
}

#[rstest]
#[case("priv", "priv 2")]
#[case("priv", "priv 4")]
#[case("virt", "virt 2")]
#[case("priv_ver", "priv_ver 11200")]
#[case("vext_ver", "vext_ver 0")]
#[case("features", "features 100000000")]
fn test_unrepresentable_value(#[case] field: &str, #[case] replacement: &str) {
    let text = with_line(&saved(realized(HartModel::Rv64).state()), field, replacement);
    let mut target = realized(HartModel::Rv64);
    let err = snapshot::restore(target.state_mut(), text.as_bytes()).unwrap_err();
    assert!(matches!(err, CheckpointError::InvalidValue { .. }));
    assert_eq!(err.field(), Some(field));
}

#[test]
fn test_prefixed_and_spaced_values_accepted() {
    let text = with_line(
        &saved(realized(HartModel::Rv64).state()),
        "pc",
        "  pc   0x80000000 ",
    );
    let mut target = realized(HartModel::Rv64);
    snapshot::restore(target.state_mut(), text.as_bytes()).unwrap();
    assert_eq!(target.state().pc, 0x8000_0000);
}

#[test]
fn test_x0_value_is_ignored() {
    let text = with_line(
        &saved(realized(HartModel::Rv64).state()),
        "x0/zero",
        "x0/zero 1234",
    );
    let mut target = realized(HartModel::Rv64);
    snapshot::restore(target.state_mut(), text.as_bytes()).unwrap();
    assert_eq!(target.state().gpr.read(0), 0);
}

#[test]
fn test_missing_pmp_block() {
    let source = realized(HartModel::SifiveU54);
    let text: String = saved(source.state())
        .lines()
        .take(36 + 64)
        .map(|l| format!("{l}\n"))
        .collect();
    let mut target = realized(HartModel::SifiveU54);
    let err = snapshot::restore(target.state_mut(), text.as_bytes()).unwrap_err();
    assert_eq!(err.field(), Some("pmpaddr_0"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut target = realized(HartModel::Rv64);
    let err = snapshot::restore_from_path(target.state_mut(), dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, CheckpointError::Io(_)));
    assert_eq!(err.field(), None);
}
