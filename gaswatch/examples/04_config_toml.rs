use gaswatch::{AnalysisConfig, GasWatch, JoinMode};
use gaswatch_mock::MockConnector;
use std::sync::Arc;

const CONFIG: &str = r#"
cutoff = "2021-08-05"
resample_days = 14
merge_history_strategy = "Fallback"

[provider_timeout]
secs = 5
nanos = 0

[history]
network = "eth"
from = 1626307200
to = 1629936000
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = AnalysisConfig::from_toml_str(CONFIG)?;
    println!("{cfg:#?}");

    let gw = GasWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .config(cfg)
        .metric("BlockSize", JoinMode::Inner)
        .build()?;

    let analysis = gw.analyze(&["BlockSize"]).await?;
    println!(
        "{} buckets of {} days",
        analysis.resampled.len(),
        analysis.resampled.period_days
    );
    Ok(())
}
