use gaswatch_core::{Candle, CandleHistory, HistoryWindow, Network};

use super::{DAYS, unix};

/// Daily candles for `network`, clipped to the window and the candle limit.
pub fn for_window(window: &HistoryWindow) -> Option<CandleHistory> {
    let all = match window.network {
        Network::Eth => eth(),
        _ => return None,
    };
    let candles = all
        .into_iter()
        .filter(|c| c.timestamp >= window.from && c.timestamp <= window.to)
        .take(window.candles as usize)
        .collect();
    Some(CandleHistory { candles })
}

fn eth() -> Vec<Candle> {
    (0..DAYS)
        .map(|i| {
            let open = 30.0 + f64::from(i) * 0.5;
            Candle {
                timestamp: unix(i),
                open,
                close: open + 2.0,
                low: open - 5.0,
                high: open + 20.0,
                avg_gas: 40.0 + f64::from(i),
                samples: 1440,
            }
        })
        .collect()
}
