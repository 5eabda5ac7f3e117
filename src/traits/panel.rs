use crate::common::server::ServerDescriptor;
use crate::probe::status_cache::StatusCache;

pub struct PanelContext<'a> {
    pub servers: &'a [ServerDescriptor],
    pub cache: &'a StatusCache,
}

/// A view the hub can show. Panels are registered statically at startup.
pub trait Panel: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, ctx: &PanelContext<'_>) -> serde_json::Value;
}
