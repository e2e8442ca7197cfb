pub mod analysis;
pub mod history;
pub mod metrics;
pub mod unified;
