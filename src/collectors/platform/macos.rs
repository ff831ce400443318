use async_trait::async_trait;
use log::{debug, trace};
use std::time::Duration;

use super::helper::{HelperRunner, ProcessRunner};
use super::{DEFAULT_HELPER_TIMEOUT, RawSampler, parse_counter};
use crate::collectors::bandwidth::{RawSample, SamplerError};

/// Interface name prefixes counted as physical or wireless links
const PHYSICAL_PREFIXES: &[&str] = &["en", "wl"];

// Zero-based whitespace columns of `netstat -ib`:
// Name Mtu Network Address Ipkts Ierrs Ibytes Opkts Oerrs Obytes Coll
const IBYTES_FIELD: usize = 6;
const OBYTES_FIELD: usize = 9;

/// Reads interface counters from the BSD-style `netstat -ib` table
#[derive(Debug)]
pub struct NetstatSampler<R: HelperRunner = ProcessRunner> {
    timeout: Duration,
    runner: R,
}

impl Default for NetstatSampler {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER_TIMEOUT)
    }
}

impl NetstatSampler {
    pub fn new(timeout: Duration) -> Self {
        Self::with_runner(timeout, ProcessRunner)
    }
}

impl<R: HelperRunner> NetstatSampler<R> {
    pub fn with_runner(timeout: Duration, runner: R) -> Self {
        Self { timeout, runner }
    }
}

#[async_trait]
impl<R: HelperRunner> RawSampler for NetstatSampler<R> {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        let output = self.runner.run("netstat", &["-ib"], self.timeout).await?;
        let sample = parse_netstat_ib(&output);
        debug!(
            "netstat sample: rx={} bytes, tx={} bytes",
            sample.bytes_in, sample.bytes_out
        );
        Ok(sample)
    }

    fn mechanism(&self) -> &'static str {
        "netstat -ib"
    }
}

/// Sums input/output bytes over rows whose interface name has a physical prefix
pub fn parse_netstat_ib(output: &str) -> RawSample {
    let mut sample = RawSample::default();

    for line in output.lines() {
        if !PHYSICAL_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= OBYTES_FIELD {
            trace!("Skipping short netstat row ({} fields): {}", fields.len(), line);
            continue;
        }

        sample.add_interface(
            parse_counter(fields[IBYTES_FIELD]),
            parse_counter(fields[OBYTES_FIELD]),
        );
    }

    sample
}
