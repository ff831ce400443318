#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ignite_node::api::{ApiError, BandwidthReport, Transport};
use ignite_node::collectors::bandwidth::{RawSample, SamplerError};
use ignite_node::collectors::platform::RawSampler;

/// Sampler that replays a fixed script of results, then reports unavailable
pub struct ScriptedSampler {
    script: Mutex<VecDeque<Result<RawSample, SamplerError>>>,
}

impl ScriptedSampler {
    pub fn new(script: Vec<Result<RawSample, SamplerError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }

    pub fn samples(samples: &[(u64, u64)]) -> Self {
        Self::new(samples.iter().map(|&(rx, tx)| Ok(RawSample::new(rx, tx))).collect())
    }
}

#[async_trait]
impl RawSampler for ScriptedSampler {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unavailable)
    }

    fn mechanism(&self) -> &'static str {
        "scripted"
    }
}

pub fn unavailable() -> Result<RawSample, SamplerError> {
    Err(SamplerError::parse("scripted", "no counters"))
}

/// Transport that records every report and fails the calls listed in `fail_on`
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub reports: Arc<Mutex<Vec<BandwidthReport>>>,
    fail_on: Vec<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the given zero-based send attempts with a 503
    pub fn failing_on(fail_on: &[usize]) -> Self {
        Self {
            reports: Arc::default(),
            fail_on: fail_on.to_vec(),
        }
    }

    pub fn sent(&self) -> Vec<BandwidthReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_bandwidth(&self, report: BandwidthReport) -> Result<(), ApiError> {
        let mut reports = self.reports.lock().unwrap();
        let attempt = reports.len();
        reports.push(report);
        if self.fail_on.contains(&attempt) {
            return Err(ApiError::Status {
                status: 503,
                message: "collector unavailable".to_string(),
            });
        }
        Ok(())
    }
}

/// Transport whose every send hangs for `delay` before being recorded
#[derive(Clone)]
pub struct StalledTransport {
    delay: std::time::Duration,
    pub completed: Arc<Mutex<Vec<BandwidthReport>>>,
}

impl StalledTransport {
    pub fn new(delay: std::time::Duration) -> Self {
        Self {
            delay,
            completed: Arc::default(),
        }
    }

    pub fn completed(&self) -> Vec<BandwidthReport> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StalledTransport {
    async fn send_bandwidth(&self, report: BandwidthReport) -> Result<(), ApiError> {
        tokio::time::sleep(self.delay).await;
        self.completed.lock().unwrap().push(report);
        Ok(())
    }
}

/// Sampler whose every read hangs for `delay` before returning `sample`
pub struct StalledSampler {
    pub delay: std::time::Duration,
    pub sample: RawSample,
}

#[async_trait]
impl RawSampler for StalledSampler {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.sample)
    }

    fn mechanism(&self) -> &'static str {
        "stalled"
    }
}
