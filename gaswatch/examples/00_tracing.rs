mod common;
use common::{get_connector, london_window};
use gaswatch::GasWatch;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,gaswatch=trace,gaswatch_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let gw = GasWatch::builder()
        .with_connector(get_connector())
        .history(london_window())
        .build()?;

    let unified = gw.unified().await?;
    let resampled = gw.resample(&unified.table)?;
    let _ = gw.report(&resampled, &["average_gas_price"]);

    Ok(())
}
