use std::collections::HashMap;
use std::sync::RwLock;

use crate::common::liveness::{LivenessRecord, PortState, Reachability};

/// Latest liveness per server address.
///
/// Entries appear the first time a probe cycle touches an address and are
/// never evicted. Lock hold times are a single map operation, so readers are
/// never stuck behind a running probe.
pub struct StatusCache {
    records: RwLock<HashMap<String, LivenessRecord>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_reachability(&self, address: &str) -> Reachability {
        self.read(|records| records.get(address).map(|r| r.reachable))
            .unwrap_or_default()
    }

    pub fn get_port_state(&self, address: &str, port: u16) -> PortState {
        self.read(|records| records.get(address).map(|r| r.port_state(port)))
            .unwrap_or_default()
    }

    pub fn get_record(&self, address: &str) -> Option<LivenessRecord> {
        self.read(|records| records.get(address).cloned())
    }

    pub fn set_reachability(&self, address: &str, value: Reachability) {
        self.write(|records| {
            records.entry(address.to_string()).or_default().reachable = value;
        });
    }

    pub fn set_port_state(&self, address: &str, port: u16, value: PortState) {
        self.write(|records| {
            records
                .entry(address.to_string())
                .or_default()
                .port_states
                .insert(port, value);
        });
    }

    /// Replaces whatever was cached for `address`.
    pub fn set_record(&self, address: &str, record: LivenessRecord) {
        self.write(|records| {
            records.insert(address.to_string(), record);
        });
    }

    pub fn snapshot(&self) -> HashMap<String, LivenessRecord> {
        self.read(|records| records.clone())
    }

    pub fn len(&self) -> usize {
        self.read(|records| records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A writer that panicked mid-insert leaves the map itself intact, so a
    // poisoned lock is still safe to use.
    fn read<T>(&self, f: impl FnOnce(&HashMap<String, LivenessRecord>) -> T) -> T {
        let guard = self.records.read().unwrap_or_else(|e| e.into_inner());
        f(&*guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut HashMap<String, LivenessRecord>) -> T) -> T {
        let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
        f(&mut *guard)
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}
