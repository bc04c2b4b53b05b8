//! Configuration loading and validation for the AWS KMS key-wrap provider.
//!
//! All values are read from environment variables. Construction fails with
//! a clear error message if a required variable is missing or empty.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// ARN (or alias ARN) of the KMS key used as the KEK. **Required.**
    pub kek_arn: String,

    /// Endpoint URL override for the KMS client. Intended for local
    /// testing against a KMS stand-in; unset in production.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.kek_arn.trim().is_empty() {
            anyhow::bail!("KEK_ARN is required and must not be empty");
        }
        if let Some(url) = &self.endpoint_url {
            if url.trim().is_empty() {
                anyhow::bail!("ENDPOINT_URL must not be empty when set");
            }
        }
        Ok(())
    }
}
