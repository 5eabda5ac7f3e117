use crate::common::server::{ImportSummary, ServerDescriptor, merge_by_address, upsert_by_address};
use crate::traits::server_store::UnsendServerStore;
use anyhow::Result;
use tokio::sync::RwLock;

/// Non-persistent store; contents are lost when the process exits.
pub struct MemoryServerStore {
    servers: RwLock<Vec<ServerDescriptor>>,
}

impl MemoryServerStore {
    pub fn new() -> Self {
        Self::with_servers(Vec::new())
    }

    pub fn with_servers(servers: Vec<ServerDescriptor>) -> Self {
        Self {
            servers: RwLock::new(servers),
        }
    }
}

impl Default for MemoryServerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsendServerStore for MemoryServerStore {
    async fn get_all_servers(&self) -> Result<Vec<ServerDescriptor>> {
        Ok(self.servers.read().await.clone())
    }

    async fn get_server(&self, address: &str) -> Result<Option<ServerDescriptor>> {
        Ok(self
            .servers
            .read()
            .await
            .iter()
            .find(|s| s.address == address)
            .cloned())
    }

    async fn save_server(&self, server: &ServerDescriptor) -> Result<()> {
        upsert_by_address(&mut *self.servers.write().await, server.clone());
        Ok(())
    }

    async fn insert_server(&self, server: &ServerDescriptor) -> Result<bool> {
        let mut servers = self.servers.write().await;
        if servers.iter().any(|s| s.address == server.address) {
            return Ok(false);
        }
        servers.push(server.clone());
        Ok(true)
    }

    async fn update_server(&self, server: &ServerDescriptor) -> Result<bool> {
        let mut servers = self.servers.write().await;
        match servers.iter_mut().find(|s| s.address == server.address) {
            Some(existing) => {
                *existing = server.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_server(&self, address: &str) -> Result<bool> {
        let mut servers = self.servers.write().await;
        let before = servers.len();
        servers.retain(|s| s.address != address);
        Ok(servers.len() != before)
    }

    async fn replace_all(&self, servers: &[ServerDescriptor]) -> Result<()> {
        *self.servers.write().await = servers.to_vec();
        Ok(())
    }

    async fn merge_servers(&self, incoming: Vec<ServerDescriptor>) -> Result<ImportSummary> {
        Ok(merge_by_address(&mut *self.servers.write().await, incoming))
    }
}
