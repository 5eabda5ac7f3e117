use crate::common::config::load_monitor_config;
use crate::server::context::MonitorContext;
use crate::server::loader::{load_server_store, seed_bundled_servers};
use crate::server::rest_server::rest_server_start;
use std::time::Duration;

pub async fn monitor_start(config_path: &str) -> anyhow::Result<()> {
    let config = load_monitor_config(config_path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::info!("Starting PACS server monitor...");

    let store = load_server_store(&config);
    let ctx = MonitorContext::new(config, store);
    if let Err(e) = seed_bundled_servers(&ctx).await {
        log::error!("Failed to import bundled server list: {:?}", e);
    }

    if let Some(secs) = ctx.config.refresh_interval_secs.filter(|s| *s > 0) {
        spawn_periodic_refresh(ctx.clone(), Duration::from_secs(secs));
    }

    rest_server_start(ctx).await
}

/// Kicks off a full cycle every `period`; ticks that land while a cycle is
/// still running are skipped.
pub fn spawn_periodic_refresh(ctx: MonitorContext, period: Duration) -> tokio::task::JoinHandle<()> {
    log::info!("Periodic refresh every {:?}", period);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match ctx.spawn_refresh_all().await {
                Ok(Some(_)) => log::debug!("Periodic refresh started"),
                Ok(None) => log::debug!("Periodic refresh skipped, cycle in flight"),
                Err(e) => log::error!("Periodic refresh failed to load servers: {:?}", e),
            }
        }
    })
}
