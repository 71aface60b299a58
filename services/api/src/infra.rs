use metrics_exporter_prometheus::PrometheusHandle;
use solar_siting::siting::OptimalSiteLocator;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared, read-only siting pipeline used by the request handlers.
#[derive(Clone, Default)]
pub(crate) struct SitingState {
    pub(crate) locator: Arc<OptimalSiteLocator>,
}

impl SitingState {
    pub(crate) fn new(locator: OptimalSiteLocator) -> Self {
        Self {
            locator: Arc::new(locator),
        }
    }
}
