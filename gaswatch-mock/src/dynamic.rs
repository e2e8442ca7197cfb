use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gaswatch_core::connector::{GasConnector, GasHistoryProvider, MetricProvider};
use gaswatch_core::{CandleHistory, GasError, HistoryWindow, MetricTable};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(GasError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_rule: Option<MockBehavior<CandleHistory>>,
    metric_rules: HashMap<String, MockBehavior<MetricTable>>,
    history_requests: Vec<HistoryWindow>,
    metric_requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `gas_history` calls.
    pub async fn set_history_behavior(&self, behavior: MockBehavior<CandleHistory>) {
        let mut guard = self.state.lock().await;
        guard.history_rule = Some(behavior);
    }

    /// Set the behavior for `metric` calls for a specific metric name.
    pub async fn set_metric_behavior(
        &self,
        name: impl Into<String>,
        behavior: MockBehavior<MetricTable>,
    ) {
        let mut guard = self.state.lock().await;
        guard.metric_rules.insert(name.into(), behavior);
    }

    /// Return a copy of the gas history request log.
    pub async fn history_requests(&self) -> Vec<HistoryWindow> {
        let guard = self.state.lock().await;
        guard.history_requests.clone()
    }

    /// Return a copy of the metric request log.
    pub async fn metric_requests(&self) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.metric_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rule = None;
        guard.metric_rules.clear();
        guard.history_requests.clear();
        guard.metric_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn GasConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn GasConnector>, controller)
    }
}

async fn play<T>(behavior: Option<MockBehavior<T>>, what: &str) -> Result<T, GasError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(GasError::not_found(what.to_string())),
    }
}

#[async_trait]
impl GasConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_gas_history_provider(&self) -> Option<&dyn GasHistoryProvider> {
        Some(self as &dyn GasHistoryProvider)
    }

    fn as_metric_provider(&self) -> Option<&dyn MetricProvider> {
        Some(self as &dyn MetricProvider)
    }
}

#[async_trait]
impl GasHistoryProvider for DynamicMockConnector {
    async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.history_requests.push(window.clone());
            guard.history_rule.clone()
        };
        play(behavior, "gas history").await
    }
}

#[async_trait]
impl MetricProvider for DynamicMockConnector {
    async fn metric(&self, name: &str) -> Result<MetricTable, GasError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.metric_requests.push(name.to_string());
            guard.metric_rules.get(name).cloned()
        };
        play(behavior, &format!("metric {name}")).await
    }

    fn supported_metrics(&self) -> &'static [&'static str] {
        &[]
    }
}
