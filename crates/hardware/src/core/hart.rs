//! Hart lifecycle.
//!
//! This module drives a hart from construction to execution. It provides:
//! 1. **Phases:** `Constructed → Configured → Realized → Reset → Running`, plus `Poisoned`.
//! 2. **Realize:** Resolves the configuration, installs the ISA identity and registers the hart.
//! 3. **Reset:** The reset policy, re-enterable any number of times after realize.
//! 4. **Remote Reset:** `ResetLine`, the only way another thread asks a hart to reset.
//! 5. **Checkpoints:** Save and restore of the register file through the snapshot codec.
//!
//! Instruction execution lives outside this crate behind `ExecutionEngine`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::common::constants::RESERVATION_INVALID;
use crate::common::{HartError, LifecycleError};
use crate::config::{HartConfig, HartModel, HartOverrides};
use crate::core::arch::csr::{FRM_RNE, MSTATUS_MIE, MSTATUS_MPRV};
use crate::core::arch::mode::PrivilegeMode;
use crate::core::state::HartState;
use crate::isa::{IsaDescriptor, resolve};
use crate::snapshot;

/// Lifecycle phase of a hart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Allocated with default options.
    Constructed,
    /// Options overridden; nothing validated yet.
    Configured,
    /// ISA resolved and hart registered. Only observable transiently, realize resets immediately.
    Realized,
    /// Reset policy applied; ready to run.
    Reset,
    /// Owned by the execution engine.
    Running,
    /// A checkpoint restore failed; register contents are undefined until the next reset.
    Poisoned,
}

impl Phase {
    /// Lower-case phase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Configured => "configured",
            Self::Realized => "realized",
            Self::Reset => "reset",
            Self::Running => "running",
            Self::Poisoned => "poisoned",
        }
    }

    /// True once realize has succeeded.
    pub const fn is_realized(self) -> bool {
        !matches!(self, Self::Constructed | Self::Configured)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The instruction-execution side of the emulator.
///
/// The hart notifies the engine when it comes into existence and after every
/// reset so that any state the engine caches (translation blocks, decoded
/// PCs) can be dropped.
pub trait ExecutionEngine {
    /// Called once, at realize, with the resolved ISA of the hart.
    fn register_hart(&mut self, hart_id: u64, isa: &IsaDescriptor);

    /// Called after a hart was reset on request, before it runs again.
    fn synchronize_post_reset(&mut self, hart_id: u64);
}

/// Engine that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEngine;

impl ExecutionEngine for NullEngine {
    fn register_hart(&mut self, _hart_id: u64, _isa: &IsaDescriptor) {}

    fn synchronize_post_reset(&mut self, _hart_id: u64) {}
}

/// Asynchronous reset request line of one hart.
///
/// Cloneable and shareable across threads. Raising the line never touches
/// the hart's registers; the hart consumes the request at its next safe
/// point in `Hart::service_pending_reset`.
#[derive(Debug, Clone, Default)]
pub struct ResetLine {
    pending: Arc<AtomicBool>,
}

impl ResetLine {
    /// Creates a line with no request pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a reset. Repeated requests before servicing collapse into one.
    pub fn request(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// True while a request is raised and not yet serviced.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consumes a pending request.
    pub(crate) fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

/// A single RISC-V hart.
#[derive(Debug)]
pub struct Hart {
    id: u64,
    config: HartConfig,
    isa: Option<IsaDescriptor>,
    state: HartState,
    phase: Phase,
    reset_line: ResetLine,
}

impl Hart {
    /// Constructs hart `hart_id` with the given options.
    ///
    /// # Arguments
    ///
    /// * `hart_id` - Value of `mhartid`.
    /// * `config` - Requested options; validated only at realize.
    pub fn new(hart_id: u64, config: HartConfig) -> Self {
        let state = HartState::new(hart_id, config.xlen, config.resetvec);
        Self {
            id: hart_id,
            config,
            isa: None,
            state,
            phase: Phase::Constructed,
            reset_line: ResetLine::new(),
        }
    }

    /// Constructs hart `hart_id` from a model preset.
    pub fn from_model(hart_id: u64, model: HartModel) -> Self {
        Self::new(hart_id, model.config())
    }

    /// Hart identifier.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Requested options.
    pub const fn config(&self) -> &HartConfig {
        &self.config
    }

    /// Resolved ISA, available once realized.
    pub const fn isa(&self) -> Option<&IsaDescriptor> {
        self.isa.as_ref()
    }

    /// Architectural state.
    pub const fn state(&self) -> &HartState {
        &self.state
    }

    /// Mutable architectural state, for the execution engine.
    pub const fn state_mut(&mut self) -> &mut HartState {
        &mut self.state
    }

    /// A handle other threads use to request a reset of this hart.
    pub fn reset_line(&self) -> ResetLine {
        self.reset_line.clone()
    }

    /// Edits the options before realize.
    ///
    /// # Errors
    ///
    /// `LifecycleError::InvalidTransition` once the hart is realized.
    pub fn configure<F>(&mut self, f: F) -> Result<(), LifecycleError>
    where
        F: FnOnce(&mut HartConfig),
    {
        if self.phase.is_realized() {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase,
                operation: "configure",
            });
        }
        f(&mut self.config);
        self.state.misa = self.config.xlen.misa_mxl();
        self.state.resetvec = self.config.resetvec;
        self.phase = Phase::Configured;
        Ok(())
    }

    /// Applies a set of overrides before realize.
    ///
    /// # Errors
    ///
    /// `LifecycleError::InvalidTransition` once the hart is realized.
    pub fn apply_overrides(&mut self, overrides: &HartOverrides) -> Result<(), LifecycleError> {
        self.configure(|cfg| overrides.apply(cfg))
    }

    /// Validates the options and brings the hart to the `Reset` phase.
    ///
    /// On success the resolved ISA is installed in the hart state, the hart is
    /// registered with `engine`, and the reset policy runs. On failure the hart
    /// stays in its current phase and cannot run.
    ///
    /// # Errors
    ///
    /// `HartError::Lifecycle` if already realized, `HartError::Config` if the
    /// options do not resolve.
    pub fn realize(&mut self, engine: &mut dyn ExecutionEngine) -> Result<(), HartError> {
        if self.phase.is_realized() {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase,
                operation: "realize",
            }
            .into());
        }
        let isa = resolve(&self.config, self.config.xlen)?;
        self.state.apply_descriptor(&isa);
        self.state.resetvec = self.config.resetvec;
        self.isa = Some(isa);
        self.phase = Phase::Realized;
        debug!(hart = self.id, isa = %isa.isa_string(), "hart realized");

        engine.register_hart(self.id, &isa);
        self.apply_reset();
        Ok(())
    }

    /// Runs the reset policy.
    ///
    /// Clears a `Poisoned` phase.
    ///
    /// # Errors
    ///
    /// `LifecycleError::InvalidTransition` before realize.
    pub fn reset(&mut self) -> Result<(), LifecycleError> {
        if !self.phase.is_realized() {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase,
                operation: "reset",
            });
        }
        self.apply_reset();
        Ok(())
    }

    fn apply_reset(&mut self) {
        let s = &mut self.state;
        s.privilege = PrivilegeMode::Machine;
        s.csrs.mstatus &= !(MSTATUS_MIE | MSTATUS_MPRV);
        s.csrs.mcause = 0;
        s.csrs.scause = 0;
        s.csrs.medeleg = 0;
        s.csrs.mideleg = 0;
        s.csrs.mtvec = 0;
        s.csrs.stvec = 0;
        s.csrs.mepc = 0;
        s.csrs.sepc = 0;
        s.csrs.satp = 0;
        s.pc = s.resetvec;
        s.two_stage_lookup = false;
        s.pmp.clear();
        s.pending_exception = None;
        s.load_res = RESERVATION_INVALID;
        s.frm = FRM_RNE;
        self.phase = Phase::Reset;
        debug!(hart = self.id, pc = format_args!("{:#x}", s.pc), "hart reset");
    }

    /// Hands the hart to the execution engine.
    ///
    /// # Errors
    ///
    /// `LifecycleError::InvalidTransition` unless the hart is in `Reset` or
    /// already `Running`.
    pub fn run(&mut self) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Reset | Phase::Running => {
                self.phase = Phase::Running;
                Ok(())
            }
            from => Err(LifecycleError::InvalidTransition {
                from,
                operation: "run",
            }),
        }
    }

    /// Services a pending remote reset request at a safe point.
    ///
    /// Called by the hart's own execution loop. Resets the hart, notifies
    /// `engine`, and resumes `Running` if the hart was running.
    ///
    /// # Returns
    ///
    /// True if a request was serviced. Requests raised before realize stay pending.
    pub fn service_pending_reset(&mut self, engine: &mut dyn ExecutionEngine) -> bool {
        if !self.phase.is_realized() || !self.reset_line.take() {
            return false;
        }
        let was_running = self.phase == Phase::Running;
        self.apply_reset();
        engine.synchronize_post_reset(self.id);
        if was_running {
            self.phase = Phase::Running;
        }
        debug!(hart = self.id, "remote reset delivered");
        true
    }

    /// Writes the register file to a checkpoint file.
    ///
    /// # Errors
    ///
    /// `HartError::Lifecycle` before realize, `HartError::Checkpoint` on I/O failure.
    pub fn save_checkpoint(&self, path: impl AsRef<Path>) -> Result<(), HartError> {
        self.require_realized("save a checkpoint of")?;
        snapshot::save_to_path(&self.state, path)?;
        Ok(())
    }

    /// Restores the register file from a checkpoint file.
    ///
    /// A failed restore leaves the fields before the failing line applied and
    /// moves the hart to `Poisoned`; only `reset` makes it runnable again.
    ///
    /// # Errors
    ///
    /// `HartError::Lifecycle` before realize, `HartError::Checkpoint` when the
    /// file cannot be read or a line is missing or malformed.
    pub fn load_checkpoint(&mut self, path: impl AsRef<Path>) -> Result<(), HartError> {
        self.require_realized("load a checkpoint into")?;
        if let Err(e) = snapshot::restore_from_path(&mut self.state, path) {
            warn!(hart = self.id, error = %e, "checkpoint restore failed, hart poisoned");
            self.phase = Phase::Poisoned;
            return Err(e.into());
        }
        debug!(hart = self.id, "checkpoint restored");
        Ok(())
    }

    fn require_realized(&self, operation: &'static str) -> Result<(), LifecycleError> {
        if self.phase.is_realized() {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                from: self.phase,
                operation,
            })
        }
    }
}
