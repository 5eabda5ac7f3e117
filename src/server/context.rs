use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

use crate::common::config::MonitorConfig;
use crate::common::liveness::LivenessRecord;
use crate::panel::registry::PanelRegistry;
use crate::probe::ProbeSettings;
use crate::probe::scheduler::{ProbeScheduler, RefreshOutcome};
use crate::probe::status_cache::StatusCache;
use crate::storage::server_store_impl::ServerStoreImpl;
use crate::traits::server_store::ServerStore;
use anyhow::Result;

/// Everything the monitor shares between the scheduler and the REST layer.
#[derive(Clone)]
pub struct MonitorContext {
    pub config: Arc<MonitorConfig>,
    pub store: Arc<ServerStoreImpl>,
    pub cache: Arc<StatusCache>,
    pub scheduler: Arc<ProbeScheduler>,
    pub panels: Arc<PanelRegistry>,
    generation: Arc<AtomicU64>,
}

impl MonitorContext {
    pub fn new(config: MonitorConfig, store: ServerStoreImpl) -> Self {
        let cache = Arc::new(StatusCache::new());
        let generation = Arc::new(AtomicU64::new(0));
        let bump = Arc::clone(&generation);
        let scheduler = ProbeScheduler::new(Arc::clone(&cache), ProbeSettings::from_config(&config))
            .with_refresh_callback(move || {
                bump.fetch_add(1, Ordering::SeqCst);
            });
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            cache,
            scheduler: Arc::new(scheduler),
            panels: Arc::new(PanelRegistry::with_default_panels()),
            generation,
        }
    }

    /// Number of completed probe cycles. Clients poll this to know when to redraw.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn refresh_all(&self) -> Result<RefreshOutcome> {
        let servers = self.store.get_all_servers().await?;
        Ok(self.scheduler.refresh_all(&servers).await)
    }

    pub async fn spawn_refresh_all(&self) -> Result<Option<JoinHandle<RefreshOutcome>>> {
        let servers = self.store.get_all_servers().await?;
        Ok(self.scheduler.spawn_refresh_all(servers))
    }

    /// `None` when no stored server has `address`.
    pub async fn refresh_one(
        &self,
        address: &str,
    ) -> Result<Option<(RefreshOutcome, LivenessRecord)>> {
        let Some(server) = self.store.get_server(address).await? else {
            return Ok(None);
        };
        let outcome = self.scheduler.refresh_one(&server).await;
        let record = self.cache.get_record(address).unwrap_or_default();
        Ok(Some((outcome, record)))
    }
}
