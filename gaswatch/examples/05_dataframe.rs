mod common;
use common::london_window;
use gaswatch::{GasWatch, JoinMode};
use gaswatch::ToDataFrame;
use gaswatch_mock::MockConnector;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .history(london_window())
        .metric("DailyEthBurnt", JoinMode::Left)
        .build()?;

    let unified = gw.unified().await?;
    println!("{}", unified.table.to_dataframe()?);

    let weekly = gw.resample(&unified.table)?;
    println!("{}", weekly.to_dataframe()?);
    Ok(())
}
