use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use volunteer_hub::marketplace::{ClockIdGenerator, MarketplaceService, MemoryStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LiveService = MarketplaceService<ClockIdGenerator>;

pub(crate) fn build_service(seed_data: bool) -> Arc<LiveService> {
    let store = if seed_data {
        MemoryStore::seeded()
    } else {
        MemoryStore::new()
    };
    Arc::new(MarketplaceService::new(
        Arc::new(store),
        Arc::new(ClockIdGenerator),
    ))
}
