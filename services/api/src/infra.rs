use claim_insight::assessment::JsonFileHistory;
use claim_insight::config::AssessmentConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn open_history(config: &AssessmentConfig) -> Arc<JsonFileHistory> {
    Arc::new(JsonFileHistory::new(config.history_path.clone()))
}
