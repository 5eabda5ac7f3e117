use crate::common::server::{ImportSummary, ServerDescriptor};
use anyhow::Result;

/// Each mutating call is atomic with respect to the others on the same store:
/// the read, the change and the write happen under one guard.
#[trait_variant::make(ServerStore: Send)]
pub trait UnsendServerStore {
    async fn get_all_servers(&self) -> Result<Vec<ServerDescriptor>>;
    async fn get_server(&self, address: &str) -> Result<Option<ServerDescriptor>>;
    /// Upsert keyed by address; an existing entry keeps its position.
    async fn save_server(&self, server: &ServerDescriptor) -> Result<()>;
    /// Adds `server` only when its address is free. Returns false otherwise.
    async fn insert_server(&self, server: &ServerDescriptor) -> Result<bool>;
    /// Replaces the entry with the same address. Returns false when there is none.
    async fn update_server(&self, server: &ServerDescriptor) -> Result<bool>;
    /// Returns false when no entry had that address.
    async fn delete_server(&self, address: &str) -> Result<bool>;
    async fn replace_all(&self, servers: &[ServerDescriptor]) -> Result<()>;
    async fn merge_servers(&self, incoming: Vec<ServerDescriptor>) -> Result<ImportSummary>;
}
