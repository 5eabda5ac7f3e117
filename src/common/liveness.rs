use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

impl From<bool> for Reachability {
    fn from(reachable: bool) -> Self {
        if reachable {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    #[default]
    Unknown,
    Open,
    Closed,
}

impl From<bool> for PortState {
    fn from(open: bool) -> Self {
        if open { PortState::Open } else { PortState::Closed }
    }
}

/// Result of the latest probe cycle for one address. Never persisted.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LivenessRecord {
    pub reachable: Reachability,
    pub port_states: BTreeMap<u16, PortState>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl LivenessRecord {
    pub fn new() -> Self {
        Self {
            reachable: Reachability::Unknown,
            port_states: BTreeMap::new(),
            checked_at: None,
        }
    }

    pub fn from_probe(reachable: bool, ports: &BTreeMap<u16, bool>) -> Self {
        Self {
            reachable: reachable.into(),
            port_states: ports.iter().map(|(p, open)| (*p, (*open).into())).collect(),
            checked_at: Some(Utc::now()),
        }
    }

    pub fn port_state(&self, port: u16) -> PortState {
        self.port_states.get(&port).copied().unwrap_or_default()
    }
}

impl Default for LivenessRecord {
    fn default() -> Self {
        Self::new()
    }
}
