use crate::common::server::{ImportSummary, ServerDescriptor};
use crate::storage::file::file_server_store::FileServerStore;
use crate::storage::memory::memory_server_store::MemoryServerStore;
use crate::traits::server_store::{ServerStore, UnsendServerStore};
use anyhow::Result;

pub enum ServerStoreImpl {
    File(FileServerStore),
    Memory(MemoryServerStore),
}

impl ServerStore for ServerStoreImpl {
    async fn get_all_servers(&self) -> Result<Vec<ServerDescriptor>> {
        match self {
            ServerStoreImpl::File(f) => f.get_all_servers().await,
            ServerStoreImpl::Memory(m) => m.get_all_servers().await,
        }
    }

    async fn get_server(&self, address: &str) -> Result<Option<ServerDescriptor>> {
        match self {
            ServerStoreImpl::File(f) => f.get_server(address).await,
            ServerStoreImpl::Memory(m) => m.get_server(address).await,
        }
    }

    async fn save_server(&self, server: &ServerDescriptor) -> Result<()> {
        match self {
            ServerStoreImpl::File(f) => f.save_server(server).await,
            ServerStoreImpl::Memory(m) => m.save_server(server).await,
        }
    }

    async fn insert_server(&self, server: &ServerDescriptor) -> Result<bool> {
        match self {
            ServerStoreImpl::File(f) => f.insert_server(server).await,
            ServerStoreImpl::Memory(m) => m.insert_server(server).await,
        }
    }

    async fn update_server(&self, server: &ServerDescriptor) -> Result<bool> {
        match self {
            ServerStoreImpl::File(f) => f.update_server(server).await,
            ServerStoreImpl::Memory(m) => m.update_server(server).await,
        }
    }

    async fn delete_server(&self, address: &str) -> Result<bool> {
        match self {
            ServerStoreImpl::File(f) => f.delete_server(address).await,
            ServerStoreImpl::Memory(m) => m.delete_server(address).await,
        }
    }

    async fn replace_all(&self, servers: &[ServerDescriptor]) -> Result<()> {
        match self {
            ServerStoreImpl::File(f) => f.replace_all(servers).await,
            ServerStoreImpl::Memory(m) => m.replace_all(servers).await,
        }
    }

    async fn merge_servers(&self, incoming: Vec<ServerDescriptor>) -> Result<ImportSummary> {
        match self {
            ServerStoreImpl::File(f) => f.merge_servers(incoming).await,
            ServerStoreImpl::Memory(m) => m.merge_servers(incoming).await,
        }
    }
}
