use crate::panel::server_status::ServerStatusPanel;
use crate::panel::summary::SummaryPanel;
use crate::traits::panel::Panel;

pub struct PanelRegistry {
    panels: Vec<Box<dyn Panel>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self { panels: Vec::new() }
    }

    pub fn with_default_panels() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ServerStatusPanel));
        registry.register(Box::new(SummaryPanel));
        registry
    }

    /// Later registrations with a taken name are ignored.
    pub fn register(&mut self, panel: Box<dyn Panel>) -> bool {
        if self.get(panel.name()).is_some() {
            log::warn!("Panel already registered: {}", panel.name());
            return false;
        }
        log::debug!("Registered panel {}", panel.name());
        self.panels.push(panel);
        true
    }

    pub fn get(&self, name: &str) -> Option<&dyn Panel> {
        self.panels
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.name()).collect()
    }
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::with_default_panels()
    }
}
