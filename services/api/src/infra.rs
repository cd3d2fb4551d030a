use credit_scoring::config::ServiceInfo;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Option<Arc<PrometheusHandle>>,
    pub(crate) service: Arc<ServiceInfo>,
}

impl AppState {
    pub(crate) fn new(service: ServiceInfo, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: metrics.map(Arc::new),
            service: Arc::new(service),
        }
    }
}
