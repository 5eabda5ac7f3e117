use crate::common::config::{MonitorConfig, StorageType};
use crate::server::context::MonitorContext;
use crate::storage::file::file_server_store::FileServerStore;
use crate::storage::memory::memory_server_store::MemoryServerStore;
use crate::storage::server_store_impl::ServerStoreImpl;
use crate::storage::transfer::import_servers;
use crate::traits::server_store::ServerStore;
use anyhow::Result;
use std::path::Path;

pub fn load_server_store(config: &MonitorConfig) -> ServerStoreImpl {
    match config.store_type {
        StorageType::File => {
            log::debug!("Using File server store at {}", config.servers_path);
            ServerStoreImpl::File(FileServerStore::new(&config.servers_path))
        }
        StorageType::Memory => {
            log::debug!("Using in-memory server store");
            ServerStoreImpl::Memory(MemoryServerStore::new())
        }
    }
}

/// Imports the bundled server list when the store holds nothing yet.
/// Returns how many entries were added.
pub async fn seed_bundled_servers(ctx: &MonitorContext) -> Result<usize> {
    let Some(bundled) = ctx.config.bundled_servers_path.as_deref() else {
        return Ok(0);
    };
    if !ctx.store.get_all_servers().await?.is_empty() {
        log::debug!("Server store not empty, skipping bundled list {}", bundled);
        return Ok(0);
    }
    let summary = import_servers(&ctx.store, Path::new(bundled)).await?;
    log::info!("Seeded {} server(s) from {}", summary.added, bundled);
    Ok(summary.added)
}
