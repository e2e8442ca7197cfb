use std::time::Duration;

use gaswatch::{AnalysisConfig, GasError, GasWatch, LONDON_UPGRADE, MergeStrategy};

use crate::helpers::{d, m_hist};

#[test]
fn build_without_connectors_is_invalid() {
    let err = GasWatch::builder().build().err().expect("should fail");
    assert!(matches!(err, GasError::InvalidArg(_)));
}

#[test]
fn zero_bucket_width_is_invalid() {
    let err = GasWatch::builder()
        .with_connector(m_hist("A", &[0], 1.0))
        .resample_days(0)
        .build()
        .err()
        .expect("should fail");
    assert!(matches!(err, GasError::InvalidArg(_)));
}

#[test]
fn defaults_and_overrides() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0], 1.0))
        .build()
        .unwrap();
    assert_eq!(gw.config(), &AnalysisConfig::default());
    assert_eq!(gw.config().cutoff, LONDON_UPGRADE);

    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0], 1.0))
        .cutoff(d(2021, 9, 1))
        .resample_days(3)
        .provider_timeout(Duration::from_millis(20))
        .merge_history_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();
    let cfg = gw.config();
    assert_eq!(cfg.cutoff, d(2021, 9, 1));
    assert_eq!(cfg.resample_days, 3);
    assert_eq!(cfg.provider_timeout, Duration::from_millis(20));
    assert_eq!(cfg.merge_history_strategy, MergeStrategy::Deep);
}

#[test]
fn config_replaces_everything_set_before() {
    let cfg = AnalysisConfig::from_toml_str("resample_days = 14").unwrap();
    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0], 1.0))
        .resample_days(3)
        .config(cfg)
        .build()
        .unwrap();
    assert_eq!(gw.config().resample_days, 14);
}
