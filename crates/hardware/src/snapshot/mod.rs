//! Register-file checkpoints.
//!
//! A checkpoint is a text stream with one architectural field per line,
//! `<name> <hex>`, in a fixed order. It provides:
//! 1. **Header:** PC, hart id, CSRs, reservation, versions, `misa`, privilege and host registers.
//! 2. **Upper Status:** `mstatush`, present only when the restored `misa` says 32-bit.
//! 3. **Register Files:** 32 integer registers then 32 floating-point registers.
//! 4. **PMP:** 16 address registers then 4 configuration registers, when the PMP feature is set.
//!
//! Restore reads strictly in order and stops at the first missing or
//! malformed line. Fields before that line stay applied, fields after it are
//! untouched; a hart whose restore failed must be reset before it runs.

mod field;
mod line;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::trace;

use crate::common::CheckpointError;
use crate::common::constants::{FPR_NAMES, GPR_NAMES, PMP_CFG_REGS, PMP_COUNT};
use crate::core::state::HartState;
use crate::isa::Features;

pub use field::SNAPSHOT_FIELDS;
use field::{HeaderField, Width};
use line::LineReader;

/// Hex digits of a floating-point register line.
const FPR_DIGITS: usize = 16;

/// Writes `state` as a checkpoint stream.
///
/// # Errors
///
/// `CheckpointError::Io` if the writer fails.
pub fn save<W: Write>(state: &HartState, mut out: W) -> Result<(), CheckpointError> {
    let xlen = state.xlen();
    let digits = xlen.hex_digits();

    for field in HeaderField::ALL {
        let width = match field.width() {
            Width::Register => digits,
            Width::Unpadded => 0,
        };
        line::put(&mut out, field.name(), field.get(state), width)?;
    }

    if state.is_32bit() {
        line::put(&mut out, "mstatush", state.csrs.mstatush(), digits)?;
    }

    for (i, value) in state.gpr.iter() {
        line::put(&mut out, GPR_NAMES[i], value, digits)?;
    }
    for (i, value) in state.fpr.iter() {
        line::put(&mut out, FPR_NAMES[i], value, FPR_DIGITS)?;
    }

    if state.has_feature(Features::PMP) {
        for i in 0..PMP_COUNT {
            line::put(&mut out, &format!("pmpaddr_{i}"), state.pmp.addr_csr_read(i), digits)?;
        }
        for i in 0..PMP_CFG_REGS {
            line::put(&mut out, &format!("pmpcfg_{i}"), state.pmp.cfg_csr_read(i, xlen), digits)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Restores `state` from a checkpoint stream.
///
/// Whether `mstatush` and the PMP block are expected is decided by the
/// `misa` and `features` values read earlier in the same stream. After the
/// PMP registers are written the rule cache is recomputed.
///
/// # Errors
///
/// The first failing line, as `MissingField`, `Malformed` or `InvalidValue`
/// naming the field; `Io` if the reader fails. `state` is partially updated.
pub fn restore<R: BufRead>(state: &mut HartState, input: R) -> Result<(), CheckpointError> {
    let mut lines = LineReader::new(input);

    for field in HeaderField::ALL {
        let value = lines.next(field.name())?;
        field.set(state, value)?;
        trace!(field = field.name(), value, "restored");
    }

    if state.is_32bit() {
        let high = lines.next("mstatush")?;
        state.csrs.set_mstatush(high);
        trace!(field = "mstatush", value = high, "restored");
    }

    for (i, name) in GPR_NAMES.iter().enumerate() {
        let value = lines.next(name)?;
        state.gpr.write(i, value);
        trace!(field = name, value, "restored");
    }
    for (i, name) in FPR_NAMES.iter().enumerate() {
        let value = lines.next(name)?;
        state.fpr.write(i, value);
        trace!(field = name, value, "restored");
    }

    if state.has_feature(Features::PMP) {
        let xlen = state.xlen();
        state.pmp.clear();
        for i in 0..PMP_COUNT {
            let value = lines.next(&format!("pmpaddr_{i}"))?;
            state.pmp.addr_csr_write(i, value);
        }
        for i in 0..PMP_CFG_REGS {
            let value = lines.next(&format!("pmpcfg_{i}"))?;
            state.pmp.cfg_csr_write(i, value, xlen);
        }
        state.pmp.update_rules();
        trace!(rules = state.pmp.num_rules(), "pmp restored");
    }

    Ok(())
}

/// Writes `state` to a checkpoint file, replacing it.
///
/// # Errors
///
/// `CheckpointError::Io` if the file cannot be created or written.
pub fn save_to_path(state: &HartState, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
    let file = File::create(path)?;
    save(state, BufWriter::new(file))
}

/// Restores `state` from a checkpoint file.
///
/// # Errors
///
/// As [`restore`]; a missing file fails before anything is applied.
pub fn restore_from_path(state: &mut HartState, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
    let file = File::open(path)?;
    restore(state, BufReader::new(file))
}
