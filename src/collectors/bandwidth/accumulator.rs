//! Lifetime bandwidth totals

use crate::collectors::bandwidth::stats::{BandwidthTotals, Delta};

/// Running totals of every delta the node has accounted for
///
/// Totals only grow; they are kept separately from the delta engine so a counter
/// reset on the host never rewinds what has already been reported.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    totals: BandwidthTotals,
    recorded: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one report cycle's delta: bytes out count as upload, bytes in as download
    pub fn record(&mut self, delta: &Delta) {
        self.totals.total_bytes_up = self.totals.total_bytes_up.saturating_add(delta.bytes_out);
        self.totals.total_bytes_down = self.totals.total_bytes_down.saturating_add(delta.bytes_in);
        self.recorded += 1;
    }

    pub fn totals(&self) -> BandwidthTotals {
        self.totals
    }

    /// Number of deltas recorded so far
    pub fn recorded(&self) -> u64 {
        self.recorded
    }
}
