use async_trait::async_trait;
use log::{debug, trace, warn};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::collectors::bandwidth::SamplerError;

/// Executes counter helper programs on behalf of a sampler
#[async_trait]
pub trait HelperRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, SamplerError>;
}

/// Spawns real child processes through [`run_helper`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl HelperRunner for ProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, SamplerError> {
        run_helper(program, args, timeout).await
    }
}

/// Runs a counter helper and returns its stdout
///
/// The child is spawned with `kill_on_drop`, so when the timeout elapses the
/// pending wait is dropped and the process is killed and reaped by the runtime.
/// A non-zero exit status is reported as a failure even if stdout is non-empty.
pub async fn run_helper(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, SamplerError> {
    trace!("Spawning helper '{}' with args {:?}", program, args);

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| SamplerError::Io {
            what: format!("helper '{program}'"),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| SamplerError::Io {
            what: format!("output of helper '{program}'"),
            source,
        })?,
        Err(_) => {
            warn!(
                "Helper '{}' did not finish within {:?} - killed",
                program, timeout
            );
            return Err(SamplerError::HelperTimeout {
                program: program.to_string(),
                timeout,
            });
        }
    };

    if !output.status.success() {
        return Err(SamplerError::HelperFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    debug!(
        "Helper '{}' finished ({} bytes of output)",
        program,
        output.stdout.len()
    );
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
