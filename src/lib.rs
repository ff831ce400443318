//! Ignite Network node
//!
//! Samples this host's interface byte counters, turns them into non-negative
//! deltas, and reports those deltas to the Ignite collector on a fixed cadence.

pub mod api;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod scheduler;
pub mod status;
