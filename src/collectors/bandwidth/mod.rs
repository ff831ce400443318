//! Bandwidth accounting module
//!
//! Turns the platform samplers' raw counters into the deltas the node reports.
//!
//! ## Module Organization
//!
//! - `stats`: RawSample, Delta and BandwidthTotals
//! - `errors`: SamplerError, the "stats unavailable" signal
//! - `delta`: DeltaEngine, previous-sample tracking and counter reset handling
//! - `accumulator`: lifetime totals independent of the delta engine
//! - `formatting`: byte and uptime formatting for human-readable output
//!
//! ## Usage
//!
//! ```no_run
//! use ignite_node::collectors::bandwidth::{Accumulator, DeltaEngine};
//! use ignite_node::collectors::platform::{DEFAULT_HELPER_TIMEOUT, create_platform_sampler};
//!
//! # async fn demo() {
//! let mut engine = DeltaEngine::new(create_platform_sampler(DEFAULT_HELPER_TIMEOUT));
//! let mut accumulator = Accumulator::new();
//! engine.next_delta().await; // baseline
//! let delta = engine.next_delta().await;
//! accumulator.record(&delta);
//! # }
//! ```

pub mod accumulator;
pub mod delta;
pub mod errors;
pub mod formatting;
pub mod stats;

pub use accumulator::Accumulator;
pub use delta::{DeltaEngine, PLACEHOLDER_DELTA};
pub use errors::SamplerError;
pub use formatting::{format_bytes, format_uptime};
pub use stats::{BandwidthTotals, Delta, RawSample};

#[cfg(test)]
pub mod tests;
