//! Per-deployment plugin configuration

use std::path::Path;

use anyhow::{Context, Result};
use couchdash_core::QueryVariant;
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// How a plugin build is deployed
///
/// ```json
/// { "queryVariant": "fts_toggle", "logFilter": "warn,couchdash_editor=debug" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentConfig {
    /// Which mode switch the query editor exposes
    pub query_variant: QueryVariant,

    /// Overrides the logging preset's default filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl DeploymentConfig {
    pub fn new(query_variant: QueryVariant) -> Self {
        Self {
            query_variant,
            log_filter: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse deployment config")
    }

    /// Read the config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deployment config: {}", path.display()))?;
        let config = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid deployment config: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            query_variant = config.query_variant.name(),
            "loaded deployment config"
        );
        Ok(config)
    }

    /// Logging preset for this build, with `log_filter` applied
    pub fn logging_config(&self) -> LoggingConfig {
        let base = if cfg!(debug_assertions) {
            LoggingConfig::development()
        } else {
            LoggingConfig::production()
        };
        match &self.log_filter {
            Some(filter) => base.with_filter(filter.clone()),
            None => base,
        }
    }
}
