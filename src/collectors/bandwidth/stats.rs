//! Bandwidth sample data structures
//!
//! This module contains the raw counter readings taken from the operating system,
//! the deltas derived from consecutive readings, and the lifetime totals reported
//! by the node.

/// Cumulative byte counters summed across all monitored interfaces at one instant
///
/// Values count from whenever the underlying OS counters last started (boot,
/// interface bring-up, driver reload) and are never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    /// Total bytes received across all counted interfaces
    pub bytes_in: u64,
    /// Total bytes sent across all counted interfaces
    pub bytes_out: u64,
}

impl RawSample {
    pub fn new(bytes_in: u64, bytes_out: u64) -> Self {
        Self {
            bytes_in,
            bytes_out,
        }
    }

    /// Adds one interface row's counters to this aggregate
    pub fn add_interface(&mut self, bytes_in: u64, bytes_out: u64) {
        self.bytes_in = self.bytes_in.saturating_add(bytes_in);
        self.bytes_out = self.bytes_out.saturating_add(bytes_out);
    }

    /// Bytes observed since `previous`
    ///
    /// Returns `None` when either counter went backwards, which means the
    /// underlying OS counter restarted or wrapped since `previous` was taken.
    pub fn delta_since(&self, previous: &RawSample) -> Option<Delta> {
        let bytes_in = self.bytes_in.checked_sub(previous.bytes_in)?;
        let bytes_out = self.bytes_out.checked_sub(previous.bytes_out)?;
        Some(Delta::new(bytes_in, bytes_out))
    }
}

/// Bytes transferred between two consecutive raw samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    /// Bytes received during the interval (download)
    pub bytes_in: u64,
    /// Bytes sent during the interval (upload)
    pub bytes_out: u64,
}

impl Delta {
    pub const ZERO: Delta = Delta {
        bytes_in: 0,
        bytes_out: 0,
    };

    pub const fn new(bytes_in: u64, bytes_out: u64) -> Self {
        Self {
            bytes_in,
            bytes_out,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes_in == 0 && self.bytes_out == 0
    }
}

/// Lifetime totals of everything the node has accounted for since it started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandwidthTotals {
    /// Sum of all reported upload bytes
    pub total_bytes_up: u64,
    /// Sum of all reported download bytes
    pub total_bytes_down: u64,
}
