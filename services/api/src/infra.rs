use lifeline::config::RewardsConfig;
use lifeline::workflows::registry::{
    InMemoryDonationLedger, InMemoryDonorDirectory, InMemoryRequestBoard, RegistryService,
};
use lifeline::workflows::rewards::{ProgressionEngine, RewardCatalog, RewardsService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryRegistry =
    RegistryService<InMemoryDonorDirectory, InMemoryDonationLedger, InMemoryRequestBoard>;
pub(crate) type MemoryRewards = RewardsService<InMemoryDonorDirectory, InMemoryDonationLedger>;

/// Registry and rewards services sharing one set of in-memory repositories.
pub(crate) fn in_memory_services(
    rewards: RewardsConfig,
    ledger: InMemoryDonationLedger,
) -> (Arc<MemoryRegistry>, Arc<MemoryRewards>) {
    let donors = Arc::new(InMemoryDonorDirectory::default());
    let ledger = Arc::new(ledger);
    let board = Arc::new(InMemoryRequestBoard::default());

    let registry = Arc::new(RegistryService::new(
        donors.clone(),
        ledger.clone(),
        board,
    ));
    let rewards = Arc::new(RewardsService::new(
        donors,
        ledger,
        RewardCatalog::standard(),
        ProgressionEngine::new(rewards),
    ));

    (registry, rewards)
}
