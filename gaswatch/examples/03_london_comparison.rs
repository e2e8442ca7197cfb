mod common;
use common::london_window;
use gaswatch::columns::{AVERAGE_GAS_PRICE, ETH_VOLUME_USD, GAS_PRICE_CLOSE};
use gaswatch::{GasWatch, JoinMode, LONDON_UPGRADE};
use gaswatch_mock::MockConnector;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .history(london_window())
        .metric(ETH_VOLUME_USD, JoinMode::Inner)
        .cutoff(LONDON_UPGRADE)
        .resample_days(7)
        .build()?;

    let analysis = gw
        .analyze(&[AVERAGE_GAS_PRICE, GAS_PRICE_CLOSE, ETH_VOLUME_USD])
        .await?;

    println!(
        "## Weekly buckets: {} (cutoff {})",
        analysis.resampled.len(),
        gw.config().cutoff
    );
    for c in &analysis.report.comparisons {
        println!(
            " - {:<18} mean {:>14.2} -> {:>14.2} ({:?})",
            c.metric, c.before.mean, c.after.mean, c.mean_direction
        );
    }
    for w in &analysis.report.warnings {
        println!(" ! {w}");
    }

    let growth = gw.compare_growth(&analysis.unified.table, ETH_VOLUME_USD)?;
    println!(
        "\n{} growth: {:.2}% before, {:.2}% after ({:?})",
        growth.metric, growth.before, growth.after, growth.direction
    );

    Ok(())
}
