//! Test module organization for bandwidth accounting
//!
//! Shared fixtures live here; behavior tests are split by component.


use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::collectors::bandwidth::{RawSample, SamplerError};
use crate::collectors::platform::RawSampler;

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
}

#[async_trait]
impl RawSampler for ScriptedSampler {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SamplerError::UnsupportedPlatform { platform: "script" }))
    }

    fn mechanism(&self) -> &'static str {
        "scripted"
    }
}

pub fn unavailable() -> Result<RawSample, SamplerError> {
    Err(SamplerError::parse("scripted", "no counters"))
}
