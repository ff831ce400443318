use async_trait::async_trait;
use log::{debug, trace};
use std::path::PathBuf;

use super::{RawSampler, parse_counter};
use crate::collectors::bandwidth::{RawSample, SamplerError};

pub const PROC_NET_DEV: &str = "/proc/net/dev";

const LOOPBACK_INTERFACE: &str = "lo";

// Post-colon column layout of /proc/net/dev: 8 receive columns then 8 transmit columns
const RX_BYTES_FIELD: usize = 0;
const TX_BYTES_FIELD: usize = 8;

/// Reads interface counters from the procfs network device table
#[derive(Debug, Clone)]
pub struct ProcNetDevSampler {
    path: PathBuf,
}

impl Default for ProcNetDevSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcNetDevSampler {
    pub fn new() -> Self {
        Self::with_path(PROC_NET_DEV)
    }

    /// Reads from an alternative file laid out like /proc/net/dev
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RawSampler for ProcNetDevSampler {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SamplerError::Io {
                what: self.path.display().to_string(),
                source,
            })?;

        let sample = parse_proc_net_dev(&contents);
        debug!(
            "procfs sample from {}: rx={} bytes, tx={} bytes",
            self.path.display(),
            sample.bytes_in,
            sample.bytes_out
        );
        Ok(sample)
    }

    fn mechanism(&self) -> &'static str {
        "procfs"
    }
}

/// Sums receive/transmit bytes across every non-loopback interface row
///
/// Header lines carry no colon and are ignored; rows with fewer than nine
/// counter columns are skipped.
pub fn parse_proc_net_dev(contents: &str) -> RawSample {
    let mut sample = RawSample::default();

    for line in contents.lines() {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name == LOOPBACK_INTERFACE {
            continue;
        }

        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() <= TX_BYTES_FIELD {
            trace!(
                "Skipping malformed procfs row for '{}' ({} fields)",
                name,
                fields.len()
            );
            continue;
        }

        sample.add_interface(
            parse_counter(fields[RX_BYTES_FIELD]),
            parse_counter(fields[TX_BYTES_FIELD]),
        );
    }

    sample
}
