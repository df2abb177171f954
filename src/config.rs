//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. The
//! `[scanner]`, `[source]` and `[engine]` sections are required;
//! `[estimator]` is optional and every field in it falls back to the
//! production default.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::engine::assembler::EngineConfig;
use crate::engine::estimator::EstimatorConfig;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub source: SourceConfig,
    pub engine: EngineSection,
    #[serde(default)]
    pub estimator: EstimatorSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    pub name: String,
    pub refresh_interval_secs: u64,
    /// How many of the most profitable flips to log each cycle.
    #[serde(default = "default_max_logged_flips")]
    pub max_logged_flips: usize,
}

fn default_max_logged_flips() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub max_pages: u32,
    pub page_batch_size: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hypixel.net/v2/skyblock".to_string(),
            max_pages: 35,
            page_batch_size: 5,
            request_timeout_secs: 30,
            user_agent: "FLIPPER/0.1.0 (auction-flip-scanner)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSection {
    pub profit_threshold: Decimal,
    pub min_buy_price: Decimal,
}

impl EngineSection {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            profit_threshold: self.profit_threshold,
            min_buy_price: self.min_buy_price,
        }
    }
}

/// Optional overrides for `EstimatorConfig`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EstimatorSection {
    pub large_sample_min: Option<usize>,
    pub max_small_sample_spread: Option<f64>,
    pub outlier_multiple: Option<Decimal>,
    pub iqr_fence: Option<Decimal>,
    pub window_fraction: Option<f64>,
    pub min_window: Option<usize>,
}

impl EstimatorSection {
    pub fn to_estimator_config(&self) -> EstimatorConfig {
        let defaults = EstimatorConfig::default();
        EstimatorConfig {
            large_sample_min: self.large_sample_min.unwrap_or(defaults.large_sample_min),
            max_small_sample_spread: self
                .max_small_sample_spread
                .unwrap_or(defaults.max_small_sample_spread),
            outlier_multiple: self.outlier_multiple.unwrap_or(defaults.outlier_multiple),
            iqr_fence: self.iqr_fence.unwrap_or(defaults.iqr_fence),
            window_fraction: self.window_fraction.unwrap_or(defaults.window_fraction),
            min_window: self.min_window.unwrap_or(defaults.min_window),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Reject values the scheduler or the estimator cannot run with.
    fn validate(&self) -> Result<()> {
        if self.scanner.refresh_interval_secs == 0 {
            bail!("scanner.refresh_interval_secs must be positive");
        }
        if self.estimator.min_window == Some(0) {
            bail!("estimator.min_window must be at least 1");
        }
        if let Some(fraction) = self.estimator.window_fraction {
            if fraction.is_nan() || fraction <= 0.0 {
                bail!("estimator.window_fraction must be positive, got {fraction}");
            }
        }
        if let Some(min) = self.estimator.large_sample_min {
            if min < 2 {
                bail!("estimator.large_sample_min must be at least 2, got {min}");
            }
        }
        Ok(())
    }
}
