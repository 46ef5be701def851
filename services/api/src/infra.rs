use credit_guard::assessment::{ArtifactStore, RiskAssessmentService};
use credit_guard::config::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the assessment service from configuration, honoring a CLI artifact override.
pub(crate) fn build_service(
    config: &AppConfig,
    artifacts_override: Option<PathBuf>,
) -> RiskAssessmentService {
    let dir = artifacts_override.unwrap_or_else(|| config.artifacts.dir.clone());
    let store = Arc::new(ArtifactStore::from_dir(dir));
    RiskAssessmentService::new(store, config.policy)
}
