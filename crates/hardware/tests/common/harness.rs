//! # Test Harness
//!
//! Builds realized harts, fills their registers with reproducible patterns
//! and captures guest-error logs.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use rvhart_core::config::{HartConfig, HartModel};
use rvhart_core::core::{Hart, HartState, NullEngine};
use rvhart_core::isa::Features;
use tracing_subscriber::EnvFilter;

/// Installs a test log subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Shared buffer that collects formatted log output.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` and returns every `guest_error` warning it logged on this thread.
pub fn guest_errors(f: impl FnOnce()) -> String {
    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::new("guest_error=warn"))
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Builds and realizes hart 0 of the given model.
pub fn realized(model: HartModel) -> Hart {
    realized_with(model.config())
}

/// Builds and realizes hart 0 with an explicit configuration.
pub fn realized_with(config: HartConfig) -> Hart {
    init_tracing();
    let mut hart = Hart::new(0, config);
    hart.realize(&mut NullEngine).expect("configuration should realize");
    hart
}

/// Fills every checkpointed register of `state` with a pattern derived from `seed`.
///
/// Typed fields get valid values, so the result survives a save/restore
/// round trip exactly. `misa` and the features are left alone.
pub fn scribble(state: &mut HartState, seed: u64) {
    let v = |n: u64| seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(n as u32) ^ n;

    state.pc = 0x8000_0000 + (seed & 0xffc);
    state.mhartid = seed & 0xf;
    let c = &mut state.csrs;
    c.mstatus = v(1);
    c.mip = v(2);
    c.mie = v(3);
    c.mideleg = v(4);
    c.medeleg = v(5);
    c.mtvec = v(6);
    c.stvec = v(7);
    c.mepc = v(8);
    c.sepc = v(9);
    c.mcause = v(10);
    c.scause = v(11);
    c.mtval = v(12);
    c.stval = v(13);
    c.mscratch = v(14);
    c.sscratch = v(15);
    c.satp = v(16);
    c.scounteren = v(17);
    c.mcounteren = v(18);
    state.load_res = v(19);
    state.load_val = v(20);
    state.frm = seed % 5;
    state.badaddr = v(21);
    state.guest_phys_fault_addr = v(22);
    state.virt = seed % 2 == 1;
    state.resetvec = v(23);
    state.mfromhost = v(24);
    state.mtohost = v(25);
    state.timecmp = v(26);

    for i in 1..32 {
        state.gpr.write(i, v(100 + i as u64));
    }
    for i in 0..32 {
        state.fpr.write(i, v(200 + i as u64));
    }

    if state.has_feature(Features::PMP) {
        let xlen = state.xlen();
        for i in 0..16 {
            state.pmp.addr_csr_write(i, v(300 + i as u64) >> 10);
        }
        // NAPOT read-exec on entry 0, TOR read-write on entry 1, locked NA4 on entry 4
        // (pmpcfg1 only exists on 32-bit harts).
        state.pmp.cfg_csr_write(0, 0x0b_1d, xlen);
        state.pmp.cfg_csr_write(1, 0x91, xlen);
    }
}
