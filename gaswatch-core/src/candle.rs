//! Gas oracle candles and the upstream history document.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::GasError;

/// One oracle-reported interval of gas prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval open time, seconds since epoch.
    pub timestamp: i64,
    /// Opening gas price, gwei.
    pub open: f64,
    /// Closing gas price, gwei.
    pub close: f64,
    /// Lowest gas price, gwei.
    pub low: f64,
    /// Highest gas price, gwei.
    pub high: f64,
    /// Average gas estimate reported by the oracle.
    pub avg_gas: f64,
    /// Number of samples behind the interval.
    pub samples: u64,
}

/// Parsed upstream history document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandleHistory {
    /// Candles in upstream order.
    pub candles: Vec<Candle>,
}

#[derive(Deserialize)]
struct WireHistory {
    candles: Vec<WireCandle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandle {
    timestamp: WireTimestamp,
    gas_price: WireGasPrice,
    avg_gas: f64,
    samples: u64,
}

#[derive(Deserialize)]
struct WireGasPrice {
    open: f64,
    close: f64,
    low: f64,
    high: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Seconds(i64),
    Text(String),
}

impl WireTimestamp {
    fn into_seconds(self) -> Result<i64, GasError> {
        match self {
            Self::Seconds(s) => Ok(s),
            Self::Text(s) => {
                if let Ok(secs) = s.trim().parse::<i64>() {
                    return Ok(secs);
                }
                DateTime::parse_from_rfc3339(s.trim())
                    .map(|dt| dt.timestamp())
                    .map_err(|e| GasError::schema(format!("candle timestamp {s:?}: {e}")))
            }
        }
    }
}

impl TryFrom<WireCandle> for Candle {
    type Error = GasError;

    fn try_from(w: WireCandle) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: w.timestamp.into_seconds()?,
            open: w.gas_price.open,
            close: w.gas_price.close,
            low: w.gas_price.low,
            high: w.gas_price.high,
            avg_gas: w.avg_gas,
            samples: w.samples,
        })
    }
}

impl CandleHistory {
    /// Parse the oracle's `{"candles": [...]}` document.
    ///
    /// # Errors
    /// Returns `Schema` if the `candles` array or any required candle field is
    /// missing or mistyped.
    pub fn from_json(value: &Value) -> Result<Self, GasError> {
        let wire = WireHistory::deserialize(value).map_err(GasError::from)?;
        let candles = wire
            .candles
            .into_iter()
            .map(Candle::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { candles })
    }

    /// Parse the oracle document from JSON text.
    ///
    /// # Errors
    /// Returns `Data` for malformed JSON and `Schema` for a well-formed document
    /// of the wrong shape.
    pub fn from_json_str(s: &str) -> Result<Self, GasError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    /// Number of candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Whether the history holds no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
