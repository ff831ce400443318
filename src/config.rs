use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scheduler::SchedulerConfig;

pub const DEFAULT_API_URL: &str = "https://ignitedepin.xyz";
pub const DEFAULT_CONFIG_FILE: &str = "ignite.toml";
pub const ENV_PREFIX: &str = "IGNITE";

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub api_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub report_interval_ms: u64,
    pub warmup_delay_ms: u64,
    pub status_interval_ms: u64,
    /// Upper bound on a counter helper process (PowerShell, netstat)
    pub helper_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

/// Values supplied on the command line; these win over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl NodeConfig {
    /// Layers defaults, the config file, `IGNITE_*` environment variables and CLI overrides
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        Self::load_with_env(overrides, None)
    }

    /// Like [`NodeConfig::load`], reading environment variables from `env` when given
    pub fn load_with_env(
        overrides: &ConfigOverrides,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("report_interval_ms", 30_000_i64)?
            .set_default("warmup_delay_ms", 2_000_i64)?
            .set_default("status_interval_ms", 60_000_i64)?
            .set_default("helper_timeout_ms", 5_000_i64)?
            .set_default("request_timeout_ms", 30_000_i64)?;

        builder = match &overrides.config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            ),
        };

        let config: NodeConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option("api_url", overrides.api_url.clone())?
            .set_override_option("email", overrides.email.clone())?
            .set_override_option("password", overrides.password.clone())?
            .build()
            .context("Failed to load node configuration")?
            .try_deserialize()
            .context("Invalid node configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a TOML file without environment overrides (e.g. for tests)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_with_env(
            &ConfigOverrides {
                config_file: Some(path.to_path_buf()),
                ..Default::default()
            },
            Some(Map::new()),
        )
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.api_url.starts_with("http://") || self.api_url.starts_with("https://"),
            "api_url must be an http(s) URL, got '{}'",
            self.api_url
        );
        anyhow::ensure!(
            self.report_interval_ms > 0,
            "report_interval_ms must be > 0, got {}",
            self.report_interval_ms
        );
        anyhow::ensure!(
            self.status_interval_ms > 0,
            "status_interval_ms must be > 0, got {}",
            self.status_interval_ms
        );
        anyhow::ensure!(
            self.helper_timeout_ms > 0,
            "helper_timeout_ms must be > 0, got {}",
            self.helper_timeout_ms
        );
        anyhow::ensure!(
            self.request_timeout_ms > 0,
            "request_timeout_ms must be > 0, got {}",
            self.request_timeout_ms
        );
        Ok(())
    }

    /// Email and password, required before the node may log in
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => anyhow::bail!(
                "Email and password required (use --email/--password or {ENV_PREFIX}_EMAIL/{ENV_PREFIX}_PASSWORD)"
            ),
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            report_interval: Duration::from_millis(self.report_interval_ms),
            warmup_delay: Duration::from_millis(self.warmup_delay_ms),
            status_interval: Duration::from_millis(self.status_interval_ms),
        }
    }

    pub fn helper_timeout(&self) -> Duration {
        Duration::from_millis(self.helper_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
