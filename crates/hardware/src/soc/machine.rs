//! Multi-hart machine.
//!
//! This module assembles a machine from configuration. It performs:
//! 1. **Hart setup:** Builds `num_harts` harts from the effective hart configuration.
//! 2. **Realize:** Realizes every hart in id order; the first failure aborts construction.
//! 3. **Device setup:** Instantiates the test finisher wired to the harts' reset lines.
//! 4. **Servicing:** Delivers pending system-wide and per-hart resets, and reports exit requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::common::{HartError, LifecycleError};
use crate::config::Config;
use crate::core::hart::{ExecutionEngine, Hart, Phase};
use crate::soc::devices::finisher::NO_EXIT;
use crate::soc::devices::{Device, Finisher};

/// A set of harts plus the finisher that controls them.
#[derive(Debug)]
pub struct Machine {
    /// Harts, indexed by hart id.
    harts: Vec<Hart>,
    /// Test finisher.
    finisher: Finisher,
    /// Exit code requested through the finisher; `NO_EXIT` until then.
    exit_request: Arc<AtomicU64>,
    /// System-wide reset requested through the finisher.
    system_reset: Arc<AtomicBool>,
}

impl Machine {
    /// Builds and realizes a machine.
    ///
    /// # Arguments
    ///
    /// * `config` - Hart selection and machine settings.
    /// * `engine` - Execution engine every hart registers with.
    ///
    /// # Returns
    ///
    /// A machine whose harts are all in the `Reset` phase.
    ///
    /// # Errors
    ///
    /// The realize error of the first hart that fails.
    pub fn new(config: &Config, engine: &mut dyn ExecutionEngine) -> Result<Self, HartError> {
        let hart_config = config.hart_config();
        let mut harts = Vec::with_capacity(config.system.num_harts);
        for id in 0..config.system.num_harts {
            let mut hart = Hart::new(id as u64, hart_config.clone());
            hart.realize(engine)?;
            harts.push(hart);
        }

        let exit_request = Arc::new(AtomicU64::new(NO_EXIT));
        let system_reset = Arc::new(AtomicBool::new(false));
        let finisher = Finisher::new(
            config.system.finisher_base,
            Arc::clone(&exit_request),
            Arc::clone(&system_reset),
            harts.iter().map(Hart::reset_line).collect(),
        );
        debug!(harts = harts.len(), "machine built");

        Ok(Self {
            harts,
            finisher,
            exit_request,
            system_reset,
        })
    }

    /// Harts, indexed by hart id.
    pub fn harts(&self) -> &[Hart] {
        &self.harts
    }

    /// Hart `id`, if it exists.
    pub fn hart(&self, id: usize) -> Option<&Hart> {
        self.harts.get(id)
    }

    /// Mutable hart `id`, if it exists.
    pub fn hart_mut(&mut self, id: usize) -> Option<&mut Hart> {
        self.harts.get_mut(id)
    }

    /// The test finisher.
    pub fn finisher_mut(&mut self) -> &mut Finisher {
        &mut self.finisher
    }

    /// Hands every hart to the execution engine.
    ///
    /// # Errors
    ///
    /// The first hart that cannot run.
    pub fn run_all(&mut self) -> Result<(), LifecycleError> {
        self.harts.iter_mut().try_for_each(Hart::run)
    }

    /// Routes a 32-bit guest write to the device at `addr`.
    ///
    /// # Returns
    ///
    /// False if no device claims the address.
    pub fn mmio_write_u32(&mut self, addr: u64, val: u32) -> bool {
        if !self.finisher.contains(addr) {
            return false;
        }
        let (base, _) = self.finisher.address_range();
        self.finisher.write_u32(addr - base, val);
        true
    }

    /// Routes a 32-bit guest read to the device at `addr`.
    pub fn mmio_read_u32(&mut self, addr: u64) -> Option<u32> {
        if !self.finisher.contains(addr) {
            return None;
        }
        let (base, _) = self.finisher.address_range();
        Some(self.finisher.read_u32(addr - base))
    }

    /// True once a system-wide reset has been requested and not yet serviced.
    pub fn system_reset_pending(&self) -> bool {
        self.system_reset.load(Ordering::Acquire)
    }

    /// Delivers pending resets.
    ///
    /// A system-wide request resets every hart and absorbs any per-hart
    /// request already raised; running harts keep running. Then every hart
    /// services its own pending request.
    ///
    /// # Returns
    ///
    /// Number of hart resets performed.
    ///
    /// # Errors
    ///
    /// `LifecycleError` if a hart is not realized.
    pub fn service_resets(&mut self, engine: &mut dyn ExecutionEngine) -> Result<usize, LifecycleError> {
        let mut count = 0;
        if self.system_reset.swap(false, Ordering::AcqRel) {
            debug!("system reset");
            for hart in &mut self.harts {
                let absorbed = hart.reset_line().take();
                let was_running = hart.phase() == Phase::Running;
                hart.reset()?;
                engine.synchronize_post_reset(hart.id());
                trace!(hart = hart.id(), absorbed, "system reset delivered");
                if was_running {
                    hart.run()?;
                }
                count += 1;
            }
        }
        for hart in &mut self.harts {
            if hart.service_pending_reset(engine) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Takes the exit code requested by the guest, if any.
    pub fn take_exit(&self) -> Option<u32> {
        let val = self.exit_request.swap(NO_EXIT, Ordering::AcqRel);
        if val == NO_EXIT { None } else { Some(val as u32) }
    }
}
