//! # Lifecycle Tests
//!
//! Phase transitions of a hart, the notifications it sends to the execution
//! engine, and delivery of remote reset requests across threads.

use std::thread;

use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rvhart_core::common::{ConfigError, HartError, LifecycleError};
use rvhart_core::config::{HartConfig, HartModel};
use rvhart_core::core::{Hart, NullEngine, Phase};
use rvhart_core::isa::Xlen;

use crate::common::harness::{init_tracing, realized};
use crate::common::mocks::engine::{MockEngine, RecordingEngine};

// ══════════════════════════════════════════════════════════
// 1. Phases
// ══════════════════════════════════════════════════════════

#[test]
fn test_new_hart_is_constructed() {
    let hart = Hart::from_model(2, HartModel::SifiveE31);
    assert_eq!(hart.phase(), Phase::Constructed);
    assert_eq!(hart.id(), 2);
    assert_eq!(hart.state().mhartid, 2);
    assert!(hart.isa().is_none());
    assert!(hart.state().is_32bit());
}

#[test]
fn test_configure_then_realize() {
    init_tracing();
    let mut hart = Hart::from_model(0, HartModel::Rv64);
    hart.configure(|cfg| cfg.ext_h = true).unwrap();
    assert_eq!(hart.phase(), Phase::Configured);

    hart.realize(&mut NullEngine).unwrap();
    assert_eq!(hart.phase(), Phase::Reset);
    assert_eq!(hart.isa().unwrap().isa_string(), "rv64imafdcsuh");
    assert_eq!(hart.state().isa_string(), "rv64imafdcsuh");
}

#[test]
fn test_configure_can_change_width() {
    let mut hart = Hart::from_model(0, HartModel::Rv64);
    hart.configure(|cfg| {
        cfg.xlen = Xlen::Rv32;
        cfg.resetvec = 0x2000;
    })
    .unwrap();
    assert!(hart.state().is_32bit());
    assert_eq!(hart.state().resetvec, 0x2000);
}

#[test]
fn test_phase_names() {
    assert_eq!(Phase::Constructed.to_string(), "constructed");
    assert_eq!(Phase::Running.to_string(), "running");
    assert_eq!(Phase::Poisoned.name(), "poisoned");
    assert!(!Phase::Configured.is_realized());
    assert!(Phase::Realized.is_realized());
    assert!(Phase::Poisoned.is_realized());
}

// ══════════════════════════════════════════════════════════
// 2. Invalid Transitions
// ══════════════════════════════════════════════════════════

#[test]
fn test_configure_after_realize_is_rejected() {
    let mut hart = realized(HartModel::SifiveU54);
    let err = hart.configure(|cfg| cfg.ext_v = true).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::InvalidTransition {
            from: Phase::Reset,
            operation: "configure",
        }
    );
    assert!(!hart.config().ext_v);
}

#[test]
fn test_realize_twice_is_rejected() {
    let mut hart = realized(HartModel::SifiveU54);
    assert!(matches!(
        hart.realize(&mut NullEngine),
        Err(HartError::Lifecycle(LifecycleError::InvalidTransition {
            from: Phase::Reset,
            operation: "realize",
        }))
    ));
}

#[test]
fn test_reset_and_run_require_realize() {
    let mut hart = Hart::from_model(0, HartModel::Any);
    assert!(hart.reset().is_err());
    let err = hart.run().unwrap_err();
    assert_eq!(err.to_string(), "cannot run a hart in phase constructed");
    assert_eq!(hart.phase(), Phase::Constructed);
}

#[test]
fn test_run_is_reentrant() {
    let mut hart = realized(HartModel::Any);
    hart.run().unwrap();
    hart.run().unwrap();
    assert_eq!(hart.phase(), Phase::Running);
}

#[test]
fn test_failed_realize_keeps_phase() {
    init_tracing();
    let mut hart = Hart::from_model(0, HartModel::Rv32);
    hart.configure(|cfg| cfg.ext_e = true).unwrap();

    let mut engine = MockEngine::new();
    let _ = engine.expect_register_hart().times(0);

    let err = hart.realize(&mut engine).unwrap_err();
    assert!(matches!(err, HartError::Config(ConfigError::IncompatibleBase)));
    assert_eq!(hart.phase(), Phase::Configured);
    assert!(hart.isa().is_none());
    assert!(hart.run().is_err());
}

#[test]
fn test_failed_realize_message() {
    let mut hart = Hart::new(
        0,
        HartConfig {
            ext_v: true,
            vlen: 96,
            ..HartConfig::default()
        },
    );
    let err = hart.realize(&mut NullEngine).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Vector extension vlen must be power of 2, got 96"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Engine Notifications
// ══════════════════════════════════════════════════════════

#[test]
fn test_realize_registers_with_engine() {
    let mut engine = MockEngine::new();
    let _ = engine
        .expect_register_hart()
        .withf(|id, isa| *id == 3 && isa.isa_string() == "rv64imafdcsu")
        .times(1)
        .return_const(());
    let _ = engine.expect_synchronize_post_reset().times(0);

    let mut hart = Hart::from_model(3, HartModel::SifiveU54);
    hart.realize(&mut engine).unwrap();
}

#[test]
fn test_remote_reset_synchronizes_engine() {
    let mut engine = MockEngine::new();
    let _ = engine.expect_register_hart().return_const(());
    let _ = engine
        .expect_synchronize_post_reset()
        .with(eq(5))
        .times(1)
        .return_const(());

    let mut hart = Hart::from_model(5, HartModel::Rv64);
    hart.realize(&mut engine).unwrap();
    hart.reset_line().request();
    assert!(hart.service_pending_reset(&mut engine));
}

#[test]
fn test_direct_reset_does_not_notify_engine() {
    let mut engine = RecordingEngine::default();
    let mut hart = Hart::from_model(1, HartModel::SifiveE51);
    hart.realize(&mut engine).unwrap();
    hart.reset().unwrap();
    assert_eq!(engine.registered, vec![(1, "rv64imacu".to_string())]);
    assert!(engine.synchronized.is_empty());
}

// ══════════════════════════════════════════════════════════
// 4. Remote Reset
// ══════════════════════════════════════════════════════════

#[test]
fn test_remote_reset_from_another_thread() {
    let mut engine = RecordingEngine::default();
    let mut hart = realized(HartModel::SifiveU54);
    hart.run().unwrap();
    hart.state_mut().set_pc(0x8000_1234);

    let line = hart.reset_line();
    thread::spawn(move || line.request()).join().unwrap();

    // Raising the line does not touch the registers.
    assert_eq!(hart.state().pc, 0x8000_1234);
    assert!(hart.reset_line().is_pending());

    assert!(hart.service_pending_reset(&mut engine));
    assert_eq!(hart.state().pc, 0x1000);
    assert_eq!(hart.phase(), Phase::Running);
    assert_eq!(engine.synchronized, vec![0]);
    assert!(!hart.reset_line().is_pending());
}

#[test]
fn test_repeated_requests_collapse() {
    let mut engine = RecordingEngine::default();
    let mut hart = realized(HartModel::Any);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let line = hart.reset_line();
            thread::spawn(move || line.request())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert!(hart.service_pending_reset(&mut engine));
    assert!(!hart.service_pending_reset(&mut engine));
    assert_eq!(engine.synchronized.len(), 1);
}

#[test]
fn test_service_without_request() {
    let mut engine = RecordingEngine::default();
    let mut hart = realized(HartModel::Any);
    hart.state_mut().set_pc(0x4000);
    assert!(!hart.service_pending_reset(&mut engine));
    assert_eq!(hart.state().pc, 0x4000);
    assert!(engine.synchronized.is_empty());
}

#[test]
fn test_request_before_realize_stays_pending() {
    let mut engine = RecordingEngine::default();
    let mut hart = Hart::from_model(0, HartModel::Any);
    hart.reset_line().request();
    assert!(!hart.service_pending_reset(&mut engine));
    assert!(hart.reset_line().is_pending());

    hart.realize(&mut engine).unwrap();
    assert!(hart.service_pending_reset(&mut engine));
    assert_eq!(hart.phase(), Phase::Reset);
}

// ══════════════════════════════════════════════════════════
// 5. Checkpoints and Poisoning
// ══════════════════════════════════════════════════════════

#[test]
fn test_checkpoint_requires_realize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hart.ckpt");
    let mut hart = Hart::from_model(0, HartModel::Any);
    assert!(matches!(
        hart.save_checkpoint(&path),
        Err(HartError::Lifecycle(_))
    ));
    assert!(matches!(
        hart.load_checkpoint(&path),
        Err(HartError::Lifecycle(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_successful_load_keeps_phase() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hart.ckpt");

    let mut hart = realized(HartModel::SifiveU54);
    hart.state_mut().gpr.write(10, 0xabcd);
    hart.save_checkpoint(&path).unwrap();

    let mut other = realized(HartModel::SifiveU54);
    other.run().unwrap();
    other.load_checkpoint(&path).unwrap();
    assert_eq!(other.phase(), Phase::Running);
    assert_eq!(other.state().gpr.read(10), 0xabcd);
}

#[test]
fn test_failed_load_poisons_until_reset() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.ckpt");
    std::fs::write(&path, "pc 0000000000002000\nmhartid 0000000000000000\n").unwrap();

    let mut hart = realized(HartModel::Rv64);
    hart.run().unwrap();
    let err = hart.load_checkpoint(&path).unwrap_err();
    assert!(matches!(err, HartError::Checkpoint(ref e) if e.field() == Some("mstatus")));
    assert_eq!(hart.phase(), Phase::Poisoned);
    assert_eq!(hart.state().pc, 0x2000);

    assert_eq!(
        hart.run().unwrap_err(),
        LifecycleError::InvalidTransition {
            from: Phase::Poisoned,
            operation: "run",
        }
    );

    hart.reset().unwrap();
    assert_eq!(hart.phase(), Phase::Reset);
    assert_eq!(hart.state().pc, 0x1000);
    hart.run().unwrap();
}

#[test]
fn test_missing_checkpoint_file_poisons() {
    let dir = tempfile::tempdir().unwrap();
    let mut hart = realized(HartModel::Rv64);
    assert!(hart.load_checkpoint(dir.path().join("absent")).is_err());
    assert_eq!(hart.phase(), Phase::Poisoned);
}
