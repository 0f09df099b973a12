//! Test Finisher.
//!
//! A memory-mapped register block a guest writes to end a test run or reset
//! harts. Only 4-byte accesses are valid; reads always return 0.
//!
//! # Registers
//!
//! * `0x00`: System-wide command register.
//! * `0x04 * n`: Command register of hart `n` (`n >= 1`).
//!
//! The low 16 bits of a written value select the command:
//!   * `0x3333`: Fail, exit with the code in bits 16-31.
//!   * `0x5555`: Pass, exit with code 0.
//!   * `0x7777`: Reset the whole system (offset 0) or the addressed hart.
//!
//! Any other command is a guest error and is ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::core::hart::ResetLine;
use crate::soc::traits::Device;

/// Command: test failed.
pub const FINISHER_FAIL: u32 = 0x3333;
/// Command: test passed.
pub const FINISHER_PASS: u32 = 0x5555;
/// Command: reset.
pub const FINISHER_RESET: u32 = 0x7777;

/// Size of the MMIO region in bytes.
pub const FINISHER_SIZE: u64 = 0x1000;

/// Value of the exit signal while no exit has been requested.
pub const NO_EXIT: u64 = u64::MAX;

/// Test-finisher device.
#[derive(Debug)]
pub struct Finisher {
    /// Base physical address of the device.
    base_addr: u64,
    /// Exit code requested by the guest, `NO_EXIT` until then.
    exit_signal: Arc<AtomicU64>,
    /// Raised by a system-wide reset command.
    system_reset: Arc<AtomicBool>,
    /// Reset lines indexed by hart id.
    hart_resets: Vec<ResetLine>,
}

impl Finisher {
    /// Creates a finisher.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - The base physical address.
    /// * `exit_signal` - Shared exit code, set on pass or fail.
    /// * `system_reset` - Shared flag, raised on a system-wide reset.
    /// * `hart_resets` - Reset line of every hart, indexed by hart id.
    pub fn new(
        base_addr: u64,
        exit_signal: Arc<AtomicU64>,
        system_reset: Arc<AtomicBool>,
        hart_resets: Vec<ResetLine>,
    ) -> Self {
        Self {
            base_addr,
            exit_signal,
            system_reset,
            hart_resets,
        }
    }
}

impl Device for Finisher {
    fn name(&self) -> &str {
        "finisher"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, FINISHER_SIZE)
    }

    fn read_u32(&mut self, _offset: u64) -> u32 {
        0
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        debug!(offset, val = format_args!("{val:#x}"), "finisher write");
        let system_wide = offset == 0;
        let hart = offset >> 2;
        let status = val & 0xffff;
        let code = (val >> 16) & 0xffff;

        match status {
            FINISHER_FAIL => self.exit_signal.store(u64::from(code), Ordering::Release),
            FINISHER_PASS => self.exit_signal.store(0, Ordering::Release),
            FINISHER_RESET if system_wide => self.system_reset.store(true, Ordering::Release),
            FINISHER_RESET => match usize::try_from(hart).ok().and_then(|h| self.hart_resets.get(h)) {
                Some(line) => {
                    line.request();
                    debug!(hart, "hart reset requested");
                }
                None => warn!(target: "guest_error", hart, "finisher reset of nonexistent hart"),
            },
            _ => warn!(
                target: "guest_error",
                offset,
                val = format_args!("{val:#x}"),
                "finisher: unknown command"
            ),
        }
    }
}
