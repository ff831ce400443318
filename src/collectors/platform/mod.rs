use async_trait::async_trait;
use std::time::Duration;

use crate::collectors::bandwidth::{RawSample, SamplerError};

// Platform-specific interface counter sources
// Each OS family exposes cumulative byte counters through a different mechanism;
// every sampler normalizes them into one aggregated RawSample

/// Time-bounded execution of external counter helpers
pub mod helper;

/// Linux counters read from the procfs network device table
pub mod linux;

/// macOS counters parsed from `netstat -ib` columns
pub mod macos;

/// Windows counters from `Get-NetAdapterStatistics`, falling back to `netstat -e`
pub mod windows;

/// Default bound on how long a counter helper process may run
pub const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait RawSampler: Send + Sync {
    /// Reads the current cumulative counters summed across all real interfaces
    async fn sample(&self) -> Result<RawSample, SamplerError>;

    /// Short name of the counter mechanism, used in logs and diagnostics
    fn mechanism(&self) -> &'static str;
}

/// Sampler for operating systems without a known counter mechanism
#[derive(Debug, Default)]
pub struct UnsupportedSampler;

#[async_trait]
impl RawSampler for UnsupportedSampler {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        Err(SamplerError::UnsupportedPlatform {
            platform: std::env::consts::OS,
        })
    }

    fn mechanism(&self) -> &'static str {
        "unsupported"
    }
}

pub fn create_platform_sampler(helper_timeout: Duration) -> Box<dyn RawSampler> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        let _ = helper_timeout;
        Box::new(linux::ProcNetDevSampler::new())
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(macos::NetstatSampler::new(helper_timeout))
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsSampler::new(helper_timeout))
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "windows"
    )))]
    {
        let _ = helper_timeout;
        Box::new(UnsupportedSampler)
    }
}

/// Human-readable name of the host operating system for the startup banner
pub fn detected_platform() -> String {
    sysinfo::System::long_os_version()
        .or_else(sysinfo::System::name)
        .unwrap_or_else(|| std::env::consts::OS.to_string())
}

/// Parses one counter column; non-numeric columns count as zero
pub(crate) fn parse_counter(field: &str) -> u64 {
    field.trim().parse().unwrap_or(0)
}
