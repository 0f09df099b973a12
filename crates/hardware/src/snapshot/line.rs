//! Line grammar of the checkpoint stream.

use std::io::{self, BufRead, Write};

use crate::common::CheckpointError;

/// Writes one `<name> <hex>` line, zero-padded to at least `digits` digits.
pub fn put<W: Write>(out: &mut W, name: &str, value: u64, digits: usize) -> io::Result<()> {
    writeln!(out, "{name} {value:0digits$x}")
}

/// Reads named lines from a checkpoint stream in order.
pub struct LineReader<R> {
    input: R,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
        }
    }

    /// Reads the next line and returns its value if it carries `expected`.
    ///
    /// Surrounding whitespace is ignored and the value may carry a `0x` prefix.
    pub fn next(&mut self, expected: &str) -> Result<u64, CheckpointError> {
        self.buf.clear();
        if self.input.read_line(&mut self.buf)? == 0 {
            return Err(CheckpointError::MissingField {
                field: expected.to_string(),
            });
        }
        let line = self.buf.trim();
        parse(line, expected).ok_or_else(|| CheckpointError::Malformed {
            field: expected.to_string(),
            line: line.to_string(),
        })
    }
}

fn parse(line: &str, expected: &str) -> Option<u64> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let value = tokens.next()?;
    if name != expected || tokens.next().is_some() {
        return None;
    }
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16).ok()
}
