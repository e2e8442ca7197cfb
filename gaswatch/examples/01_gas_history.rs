mod common;
use common::london_window;
use gaswatch::{GasConnector, GasWatch, MergeStrategy};
use gaswatch_mock::MockConnector;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Register the live connector first and the mock as a backfill.
    let live = common::get_connector();
    let mock = Arc::new(MockConnector::new());

    // 2. Deep merge: every connector is asked, earlier registrations win duplicates.
    let gw = GasWatch::builder()
        .with_connector(live.clone())
        .with_connector(mock.clone())
        .merge_history_strategy(MergeStrategy::Deep)
        .build()?;

    println!("Priority: [{}, {}]", live.name(), mock.name());

    let (history, attribution) = gw.gas_history_with_attribution(&london_window()).await?;

    println!("\n## Merged History ({} candles):", history.len());
    for candle in history.candles.iter().take(10) {
        println!(
            " - TS: {}, open {:.1} / close {:.1} gwei, avg gas {:.1}",
            candle.timestamp, candle.open, candle.close, candle.avg_gas
        );
    }
    if history.len() > 10 {
        println!("... and more");
    }

    println!("\n## Data Attribution:");
    for (name, span) in &attribution.spans {
        println!(
            " - Connector '{}' provided candles from TS {} to {}.",
            name, span.start, span.end
        );
    }

    Ok(())
}
