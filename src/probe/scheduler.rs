use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::common::liveness::LivenessRecord;
use crate::common::server::ServerDescriptor;
use crate::probe::ProbeSettings;
use crate::probe::ports::probe_ports;
use crate::probe::reachability::probe_reachability;
use crate::probe::status_cache::StatusCache;

/// Invoked once after every completed cycle, never per server.
pub type RefreshCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Completed { probed: usize },
    AlreadyRunning,
}

/// Holds the in-flight slot for one cycle. The `refreshing` flag is cleared
/// before the lock guard is released.
struct InFlight<G> {
    flag: Arc<AtomicBool>,
    _guard: G,
}

impl<G> InFlight<G> {
    fn new(flag: &Arc<AtomicBool>, guard: G) -> Self {
        flag.store(true, Ordering::Release);
        Self {
            flag: Arc::clone(flag),
            _guard: guard,
        }
    }
}

impl<G> Drop for InFlight<G> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs probe cycles and writes their results into the shared [`StatusCache`].
///
/// At most one cycle (full or single-server) runs at a time; a request made
/// while one is in flight is turned away with [`RefreshOutcome::AlreadyRunning`]
/// instead of racing on the cache. Cycles cannot be cancelled once started.
pub struct ProbeScheduler {
    cache: Arc<StatusCache>,
    settings: ProbeSettings,
    in_flight: Arc<Mutex<()>>,
    refreshing: Arc<AtomicBool>,
    on_refresh: Option<RefreshCallback>,
}

impl ProbeScheduler {
    pub fn new(cache: Arc<StatusCache>, settings: ProbeSettings) -> Self {
        Self {
            cache,
            settings,
            in_flight: Arc::new(Mutex::new(())),
            refreshing: Arc::new(AtomicBool::new(false)),
            on_refresh: None,
        }
    }

    pub fn with_refresh_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_refresh = Some(Arc::new(callback));
        self
    }

    pub fn cache(&self) -> &Arc<StatusCache> {
        &self.cache
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Reads the in-flight flag without touching the lock, so polling it never
    /// makes a concurrent refresh request see the slot as taken.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub async fn refresh_all(&self, servers: &[ServerDescriptor]) -> RefreshOutcome {
        let Ok(guard) = self.in_flight.try_lock() else {
            log::warn!("Refresh requested while another is in flight, skipping");
            return RefreshOutcome::AlreadyRunning;
        };
        let _slot = InFlight::new(&self.refreshing, guard);
        self.run_cycle(servers).await
    }

    pub async fn refresh_one(&self, server: &ServerDescriptor) -> RefreshOutcome {
        let Ok(guard) = self.in_flight.try_lock() else {
            log::warn!("Refresh of {} requested while another is in flight, skipping", server.address);
            return RefreshOutcome::AlreadyRunning;
        };
        let _slot = InFlight::new(&self.refreshing, guard);
        self.run_cycle(std::slice::from_ref(server)).await
    }

    /// Starts a full cycle on a background task. The in-flight slot is claimed
    /// before spawning, so `None` means another cycle already holds it.
    pub fn spawn_refresh_all(
        self: &Arc<Self>,
        servers: Vec<ServerDescriptor>,
    ) -> Option<JoinHandle<RefreshOutcome>> {
        let guard = match self.in_flight.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                log::warn!("Background refresh requested while another is in flight, skipping");
                return None;
            }
        };
        let slot = InFlight::new(&self.refreshing, guard);
        let scheduler = Arc::clone(self);
        Some(tokio::spawn(async move {
            let _slot = slot;
            scheduler.run_cycle(&servers).await
        }))
    }

    async fn run_cycle(&self, servers: &[ServerDescriptor]) -> RefreshOutcome {
        log::info!("Probe cycle started for {} server(s)", servers.len());
        for server in servers {
            let record = self.probe_server(server).await;
            log::debug!("{} ({}) -> {:?}", server.name, server.address, record.reachable);
            self.cache.set_record(&server.address, record);
        }
        log::info!("Probe cycle finished for {} server(s)", servers.len());

        if let Some(callback) = &self.on_refresh {
            callback();
        }
        RefreshOutcome::Completed {
            probed: servers.len(),
        }
    }

    async fn probe_server(&self, server: &ServerDescriptor) -> LivenessRecord {
        let reachable = probe_reachability(&server.address, &self.settings).await;
        let ports = if server.ports.is_empty() {
            Default::default()
        } else {
            probe_ports(&server.address, &server.ports, self.settings.connect_timeout).await
        };
        LivenessRecord::from_probe(reachable, &ports)
    }
}
