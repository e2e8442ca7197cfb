mod common;
use common::london_window;
use gaswatch::columns::{BLOCK_SIZE, DAILY_ETH_BURNT, ETH_VOLUME_USD, TRANSACTIONS_AMOUNT};
use gaswatch::{GasWatch, JoinMode};
use gaswatch_mock::{MockConnector, UNIQUE_ADDRESSES};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .history(london_window())
        .metric(ETH_VOLUME_USD, JoinMode::Inner)
        .metric(TRANSACTIONS_AMOUNT, JoinMode::Inner)
        .metric(BLOCK_SIZE, JoinMode::Inner)
        // Burnt fees only exist from London on; keep the earlier days.
        .metric(DAILY_ETH_BURNT, JoinMode::Left)
        .metric(UNIQUE_ADDRESSES, JoinMode::Inner)
        .build()?;

    let unified = gw.unified().await?;

    println!("## Merge steps:");
    for step in &unified.merge.steps {
        let mode = step.mode.map_or("seed", |m| m.as_str());
        println!(
            " - {:<20} {:>6} rows ({mode}, {} duplicate dates dropped)",
            step.source, step.rows, step.duplicates_dropped
        );
    }
    println!("Row attrition: {}", unified.merge.attrition());

    for (source, excluded) in unified.excluded.iter().filter(|(_, n)| *n > 0) {
        println!("{source}: {excluded} rows with unparseable dates");
    }

    let path = std::env::temp_dir().join("gaswatch_unified.csv");
    gw.persist(&unified.table, &path)?;
    let reloaded = gw.load(&path)?;
    println!(
        "\nPersisted {} rows x {} columns to {}",
        reloaded.len(),
        reloaded.columns().len(),
        path.display()
    );

    Ok(())
}
