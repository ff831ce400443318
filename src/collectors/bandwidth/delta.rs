//! Delta engine
//!
//! Converts successive raw counter readings into non-negative per-interval deltas.
//! The engine owns the only copy of the previous reading; nothing else mutates it.

use log::{debug, trace, warn};

use crate::collectors::bandwidth::errors::SamplerError;
use crate::collectors::bandwidth::stats::{Delta, RawSample};
use crate::collectors::platform::RawSampler;

/// Delta reported when the platform sampler cannot produce counters
pub const PLACEHOLDER_DELTA: Delta = Delta::new(1024, 512);

/// Turns raw samples into deltas relative to the previously stored sample
pub struct DeltaEngine {
    sampler: Box<dyn RawSampler>,
    /// Last successfully read sample; `None` until the baseline is taken
    previous: Option<RawSample>,
    /// Counter for total observations performed
    observation_count: u64,
}

impl DeltaEngine {
    pub fn new(sampler: Box<dyn RawSampler>) -> Self {
        Self {
            sampler,
            previous: None,
            observation_count: 0,
        }
    }

    pub fn previous(&self) -> Option<RawSample> {
        self.previous
    }

    pub fn observation_count(&self) -> u64 {
        self.observation_count
    }

    pub fn mechanism(&self) -> &'static str {
        self.sampler.mechanism()
    }

    /// Samples the platform counters and returns the delta since the last call
    pub async fn next_delta(&mut self) -> Delta {
        let sample = self.sampler.sample().await;
        self.observe(sample)
    }

    /// Folds one sampling result into the engine state
    ///
    /// - unavailable: returns [`PLACEHOLDER_DELTA`], previous sample untouched
    /// - first sample: stored as baseline, returns zero
    /// - any counter went backwards: stored as new baseline, returns zero
    /// - otherwise: stored, returns the difference
    pub fn observe(&mut self, sample: Result<RawSample, SamplerError>) -> Delta {
        self.observation_count += 1;

        let current = match sample {
            Ok(current) => current,
            Err(e) if e.is_timeout() => {
                warn!(
                    "Counter helper hung at observation #{} ({}) - reporting placeholder delta",
                    self.observation_count, e
                );
                return PLACEHOLDER_DELTA;
            }
            Err(e) => {
                warn!(
                    "Bandwidth stats unavailable for observation #{} ({}) - reporting placeholder delta",
                    self.observation_count, e
                );
                return PLACEHOLDER_DELTA;
            }
        };

        let Some(previous) = self.previous.replace(current) else {
            debug!(
                "Baseline established at observation #{}: rx={} bytes, tx={} bytes",
                self.observation_count, current.bytes_in, current.bytes_out
            );
            return Delta::ZERO;
        };

        match current.delta_since(&previous) {
            Some(delta) => {
                trace!(
                    "Observation #{}: rx +{} bytes, tx +{} bytes",
                    self.observation_count, delta.bytes_in, delta.bytes_out
                );
                delta
            }
            None => {
                debug!(
                    "Counter reset detected at observation #{} (rx: {} -> {}, tx: {} -> {}) - establishing new baseline",
                    self.observation_count,
                    previous.bytes_in,
                    current.bytes_in,
                    previous.bytes_out,
                    current.bytes_out
                );
                Delta::ZERO
            }
        }
    }
}
