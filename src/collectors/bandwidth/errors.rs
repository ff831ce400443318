//! Error types for bandwidth sampling
//!
//! Every variant means "stats unavailable" to the caller. None of them are fatal:
//! the delta engine degrades to a placeholder delta instead of propagating them.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Bandwidth sampling is not supported on platform '{platform}'")]
    UnsupportedPlatform { platform: &'static str },

    #[error("Failed to read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Helper '{program}' timed out after {timeout:?}")]
    HelperTimeout { program: String, timeout: Duration },

    #[error("Helper '{program}' exited with {status}: {stderr}")]
    HelperFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Unparsable {mechanism} output: {message}")]
    Parse {
        mechanism: &'static str,
        message: String,
    },

    #[error("All sampling mechanisms failed (primary: {primary}; fallback: {fallback})")]
    Exhausted {
        primary: Box<SamplerError>,
        fallback: Box<SamplerError>,
    },
}

impl SamplerError {
    pub fn parse(mechanism: &'static str, message: impl Into<String>) -> Self {
        SamplerError::Parse {
            mechanism,
            message: message.into(),
        }
    }

    /// True when the failure was the helper process hanging rather than misbehaving
    pub fn is_timeout(&self) -> bool {
        match self {
            SamplerError::HelperTimeout { .. } => true,
            SamplerError::Exhausted { primary, fallback } => {
                primary.is_timeout() || fallback.is_timeout()
            }
            _ => false,
        }
    }
}
