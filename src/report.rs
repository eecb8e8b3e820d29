//! Plain-text scan report
//!
//! ```text
//! Balance for <label> (<address>) : <balance>
//! Total: <sum>
//! ```

use crate::error::ScanResult;
use crate::types::{Amount, BalanceResult};
use std::io::Write;

pub fn format_balance_line(result: &BalanceResult) -> String {
    format!(
        "Balance for {} ({}) : {}",
        result.entry.label, result.entry.address, result.balance
    )
}

pub fn format_total_line(total: Amount) -> String {
    format!("Total: {}", total)
}

/// Writes report lines to any output, flushing after each line so results
/// show up as lookups complete
pub struct Reporter<W: Write> {
    out: W,
    lines_written: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines_written: 0,
        }
    }

    pub fn balance(&mut self, result: &BalanceResult) -> ScanResult<()> {
        writeln!(self.out, "{}", format_balance_line(result))?;
        self.out.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn total(&mut self, total: Amount) -> ScanResult<()> {
        writeln!(self.out, "{}", format_total_line(total))?;
        self.out.flush()?;
        Ok(())
    }

    /// Number of balance lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
