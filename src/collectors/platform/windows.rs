use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

use super::helper::{HelperRunner, ProcessRunner};
use super::{DEFAULT_HELPER_TIMEOUT, RawSampler, parse_counter};
use crate::collectors::bandwidth::{RawSample, SamplerError};

const ADAPTER_STATISTICS_QUERY: &str =
    "Get-NetAdapterStatistics | Select-Object -Property ReceivedBytes,SentBytes | ConvertTo-Json";

/// Token identifying the byte counter row of `netstat -e`
const NETSTAT_BYTES_MARKER: &str = "Bytes";

/// One adapter record as emitted by `ConvertTo-Json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AdapterStatistics {
    #[serde(default)]
    received_bytes: Option<u64>,
    #[serde(default)]
    sent_bytes: Option<u64>,
}

/// `ConvertTo-Json` emits a bare object for a single adapter and an array otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdapterStatisticsOutput {
    Many(Vec<AdapterStatistics>),
    One(AdapterStatistics),
}

/// Reads adapter counters via PowerShell, falling back to `netstat -e`
#[derive(Debug)]
pub struct WindowsSampler<R: HelperRunner = ProcessRunner> {
    timeout: Duration,
    runner: R,
}

impl Default for WindowsSampler {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER_TIMEOUT)
    }
}

impl WindowsSampler {
    pub fn new(timeout: Duration) -> Self {
        Self::with_runner(timeout, ProcessRunner)
    }
}

impl<R: HelperRunner> WindowsSampler<R> {
    pub fn with_runner(timeout: Duration, runner: R) -> Self {
        Self { timeout, runner }
    }

    async fn query_adapter_statistics(&self) -> Result<RawSample, SamplerError> {
        let output = self
            .runner
            .run(
                "powershell",
                &["-Command", ADAPTER_STATISTICS_QUERY],
                self.timeout,
            )
            .await?;
        parse_adapter_statistics(&output)
    }

    async fn query_netstat(&self) -> Result<RawSample, SamplerError> {
        let output = self.runner.run("netstat", &["-e"], self.timeout).await?;
        parse_netstat_e(&output)
    }
}

#[async_trait]
impl<R: HelperRunner> RawSampler for WindowsSampler<R> {
    async fn sample(&self) -> Result<RawSample, SamplerError> {
        let primary = match self.query_adapter_statistics().await {
            Ok(sample) => return Ok(sample),
            Err(e) => e,
        };

        debug!("Adapter statistics query failed ({primary}) - falling back to netstat -e");

        match self.query_netstat().await {
            Ok(sample) => Ok(sample),
            Err(fallback) => {
                warn!("Both Windows counter mechanisms failed: {primary}; {fallback}");
                Err(SamplerError::Exhausted {
                    primary: Box::new(primary),
                    fallback: Box::new(fallback),
                })
            }
        }
    }

    fn mechanism(&self) -> &'static str {
        "Get-NetAdapterStatistics"
    }
}

/// Sums received/sent bytes across all adapter records
///
/// Records with a missing or null field contribute zero for that field.
pub fn parse_adapter_statistics(output: &str) -> Result<RawSample, SamplerError> {
    let parsed: AdapterStatisticsOutput = serde_json::from_str(output.trim())
        .map_err(|e| SamplerError::parse("Get-NetAdapterStatistics", e.to_string()))?;

    let adapters = match parsed {
        AdapterStatisticsOutput::Many(adapters) => adapters,
        AdapterStatisticsOutput::One(adapter) => vec![adapter],
    };

    let mut sample = RawSample::default();
    for adapter in adapters {
        sample.add_interface(
            adapter.received_bytes.unwrap_or(0),
            adapter.sent_bytes.unwrap_or(0),
        );
    }
    Ok(sample)
}

/// Reads the first `Bytes` row of `netstat -e` as received/sent totals
pub fn parse_netstat_e(output: &str) -> Result<RawSample, SamplerError> {
    output
        .lines()
        .filter(|line| line.contains(NETSTAT_BYTES_MARKER))
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|fields| fields.len() >= 3)
        .map(|fields| RawSample::new(parse_counter(fields[1]), parse_counter(fields[2])))
        .ok_or_else(|| {
            SamplerError::parse("netstat -e", format!("no '{NETSTAT_BYTES_MARKER}' row"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers helpers listed in `outputs`; any other program times out
    #[derive(Debug, Default)]
    struct CannedRunner {
        outputs: Vec<(&'static str, &'static str)>,
        calls: Mutex<Vec<String>>,
    }

    impl CannedRunner {
        fn new(outputs: &[(&'static str, &'static str)]) -> Self {
            Self {
                outputs: outputs.to_vec(),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HelperRunner for CannedRunner {
        async fn run(
            &self,
            program: &str,
            _args: &[&str],
            timeout: Duration,
        ) -> Result<String, SamplerError> {
            self.calls.lock().unwrap().push(program.to_string());
            self.outputs
                .iter()
                .find(|(name, _)| *name == program)
                .map(|(_, output)| output.to_string())
                .ok_or_else(|| SamplerError::HelperTimeout {
                    program: program.to_string(),
                    timeout,
                })
        }
    }

    const NETSTAT_E_FIXTURE: &str = "Interface Statistics\n\nBytes   7000   3000\n";

    #[tokio::test]
    async fn test_sample_prefers_adapter_statistics() {
        let sampler = WindowsSampler::with_runner(
            DEFAULT_HELPER_TIMEOUT,
            CannedRunner::new(&[
                ("powershell", r#"{ "ReceivedBytes": 500, "SentBytes": 250 }"#),
                ("netstat", NETSTAT_E_FIXTURE),
            ]),
        );

        assert_eq!(sampler.sample().await.unwrap(), RawSample::new(500, 250));
        assert_eq!(sampler.runner.calls(), vec!["powershell"]);
    }

    #[tokio::test]
    async fn test_sample_falls_back_to_netstat_when_powershell_fails() {
        let sampler = WindowsSampler::with_runner(
            DEFAULT_HELPER_TIMEOUT,
            CannedRunner::new(&[("netstat", NETSTAT_E_FIXTURE)]),
        );

        assert_eq!(sampler.sample().await.unwrap(), RawSample::new(7000, 3000));
        assert_eq!(sampler.runner.calls(), vec!["powershell", "netstat"]);
    }

    #[tokio::test]
    async fn test_sample_falls_back_on_unparsable_powershell_output() {
        let sampler = WindowsSampler::with_runner(
            DEFAULT_HELPER_TIMEOUT,
            CannedRunner::new(&[
                ("powershell", "Get-NetAdapterStatistics : not recognized"),
                ("netstat", NETSTAT_E_FIXTURE),
            ]),
        );

        assert_eq!(sampler.sample().await.unwrap(), RawSample::new(7000, 3000));
    }

    #[tokio::test]
    async fn test_sample_exhausted_when_both_mechanisms_fail() {
        let sampler = WindowsSampler::with_runner(
            DEFAULT_HELPER_TIMEOUT,
            CannedRunner::new(&[("powershell", "not json")]),
        );

        match sampler.sample().await {
            Err(SamplerError::Exhausted { primary, fallback }) => {
                assert!(matches!(*primary, SamplerError::Parse { .. }));
                assert!(matches!(*fallback, SamplerError::HelperTimeout { .. }));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(sampler.runner.calls(), vec!["powershell", "netstat"]);
    }

    #[test]
    fn test_parse_adapter_statistics_array() {
        let output = r#"[
    { "ReceivedBytes": 1000, "SentBytes": 400 },
    { "ReceivedBytes": 2500, "SentBytes": 600 }
]"#;
        assert_eq!(
            parse_adapter_statistics(output).unwrap(),
            RawSample::new(3500, 1000)
        );
    }

    #[test]
    fn test_parse_adapter_statistics_single_object() {
        let output = "{\r\n    \"ReceivedBytes\":  123456,\r\n    \"SentBytes\":  654\r\n}\r\n";
        assert_eq!(
            parse_adapter_statistics(output).unwrap(),
            RawSample::new(123_456, 654)
        );
    }

    #[test]
    fn test_parse_adapter_statistics_missing_fields() {
        let output = r#"[{ "ReceivedBytes": 10 }, { "SentBytes": null }]"#;
        assert_eq!(
            parse_adapter_statistics(output).unwrap(),
            RawSample::new(10, 0)
        );
    }

    #[test]
    fn test_parse_adapter_statistics_rejects_garbage() {
        assert!(parse_adapter_statistics("").is_err());
        assert!(parse_adapter_statistics("Get-NetAdapterStatistics : not recognized").is_err());
    }

    #[test]
    fn test_parse_netstat_e() {
        let output = "\
Interface Statistics

                           Received            Sent

Bytes                    3318836513      1279497834
Unicast packets            10238871         6107154
Non-unicast packets          129841           21632
";
        assert_eq!(
            parse_netstat_e(output).unwrap(),
            RawSample::new(3_318_836_513, 1_279_497_834)
        );
    }

    #[test]
    fn test_parse_netstat_e_without_marker() {
        let result = parse_netstat_e("Interface Statistics\n\nUnicast packets 1 2\n");
        assert!(matches!(result, Err(SamplerError::Parse { .. })));
    }

    #[test]
    fn test_parse_netstat_e_skips_short_marker_rows() {
        let output = "Bytes\nBytes 70 80\n";
        assert_eq!(parse_netstat_e(output).unwrap(), RawSample::new(70, 80));
    }
}
