//! Runtime configuration.
//!
//! Values come from serde defaults, then an optional file, then
//! `KOLAM_`-prefixed environment variables (`KOLAM_API__LATENCY_MS=0`).

use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KolamConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Mock service behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Delay before ordinary calls resolve
    pub latency_ms: u64,
    /// Delay before design generation resolves
    pub generation_latency_ms: u64,
    /// Delay before pattern analysis resolves
    pub analysis_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency_ms: 500,
            generation_latency_ms: 1500,
            analysis_latency_ms: 2000,
        }
    }
}

impl ApiConfig {
    /// Defaults with every delay disabled.
    pub fn instant() -> Self {
        Self {
            latency_ms: 0,
            generation_latency_ms: 0,
            analysis_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation_latency_ms)
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }
}

/// Task player timings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Preview length when a recall task opens
    pub recall_preview_secs: u32,
    /// Preview length after resetting a recall task
    pub reset_preview_secs: u32,
    /// Progress required before a guided task can be completed
    pub guided_min_progress: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            recall_preview_secs: 10,
            reset_preview_secs: 5,
            guided_min_progress: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Range requested by dashboards ("7d")
    pub default_range: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            default_range: "7d".to_string(),
        }
    }
}

/// Load configuration from an optional file plus the environment.
pub fn load_config(path: Option<&str>) -> Result<KolamConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("KOLAM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
