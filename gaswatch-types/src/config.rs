//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GasError;

/// Activation day of the London upgrade (EIP-1559) on Ethereum mainnet.
pub const LONDON_UPGRADE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 8, 5) {
    Some(d) => d,
    None => panic!("invalid London upgrade date"),
};

/// Direction of a join step in a merge plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Keep only dates present on both sides.
    #[default]
    Inner,
    /// Keep every date of the accumulated left side; absent right cells stay missing.
    Left,
}

impl JoinMode {
    /// Lowercase label used in reports and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
        }
    }
}

/// Strategy for combining gas history from multiple registered connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeStrategy {
    /// Fetch from all connectors concurrently and backfill gaps from lower-priority ones.
    Deep,
    /// Try connectors in registration order and stop at the first non-empty history.
    #[default]
    Fallback,
}

/// Network served by the gas oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Network {
    /// Ethereum mainnet.
    #[default]
    Eth,
    /// BNB smart chain.
    Bsc,
}

impl Network {
    /// Path segment used by the oracle API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Bsc => "bsc",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window and cadence of a gas history request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryWindow {
    /// Network to query.
    pub network: Network,
    /// Window start, Unix seconds.
    pub from: i64,
    /// Window end, Unix seconds.
    pub to: i64,
    /// Maximum number of candles returned by the oracle.
    pub candles: u32,
    /// Candle width in minutes (1440 = daily).
    pub timeframe_minutes: u32,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            network: Network::Eth,
            // 2021-01-01 .. 2021-12-30
            from: 1_609_459_261,
            to: 1_640_822_461,
            candles: 100,
            timeframe_minutes: 1440,
        }
    }
}

impl HistoryWindow {
    /// Check the window is non-empty and the cadence is usable.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `from >= to` or when `candles` or
    /// `timeframe_minutes` is zero.
    pub fn validate(&self) -> Result<(), GasError> {
        if self.from >= self.to {
            return Err(GasError::InvalidArg(format!(
                "history window start {} is not before end {}",
                self.from, self.to
            )));
        }
        if self.candles == 0 {
            return Err(GasError::InvalidArg("candles must be positive".into()));
        }
        if self.timeframe_minutes == 0 {
            return Err(GasError::InvalidArg("timeframe must be positive".into()));
        }
        Ok(())
    }
}

/// Global configuration for the `GasWatch` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Boundary date: "before" is strictly earlier, "after" is this date or later.
    pub cutoff: NaiveDate,
    /// Width of resample buckets in days.
    pub resample_days: u32,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Strategy for combining gas history from multiple connectors.
    pub merge_history_strategy: MergeStrategy,
    /// Gas history request window.
    pub history: HistoryWindow,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cutoff: LONDON_UPGRADE,
            resample_days: 7,
            provider_timeout: Duration::from_secs(10),
            merge_history_strategy: MergeStrategy::default(),
            history: HistoryWindow::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML. Absent keys keep their defaults.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the document is not valid TOML for this schema.
    pub fn from_toml_str(s: &str) -> Result<Self, GasError> {
        toml::from_str(s).map_err(|e| GasError::InvalidArg(format!("config: {e}")))
    }
}
