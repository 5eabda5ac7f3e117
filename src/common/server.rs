use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PortSpec {
    #[serde(rename = "porta")]
    pub port_number: u16,
    #[serde(rename = "descricao", default)]
    pub label: String,
}

/// A monitored host as persisted in the server list file.
///
/// Field names on disk follow the existing sidecar format (`ip`, `ip_unidade`,
/// `portas`, `descricao`); `ip` is the storage key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerDescriptor {
    pub name: String,
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "ip_unidade", default, skip_serializing_if = "Option::is_none")]
    pub unit_address: Option<String>,
    #[serde(rename = "portas", default)]
    pub ports: Vec<PortSpec>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServerDescriptor {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            unit_address: None,
            ports: Vec::new(),
            tags: Vec::new(),
            description: None,
        }
    }

    pub fn with_port(mut self, port_number: u16, label: &str) -> Self {
        self.ports.push(PortSpec {
            port_number,
            label: label.to_string(),
        });
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub added: usize,
    pub replaced: usize,
}

/// Inserts `server` in place of the entry sharing its address, or appends it.
/// Returns true when an existing entry was replaced.
pub fn upsert_by_address(servers: &mut Vec<ServerDescriptor>, server: ServerDescriptor) -> bool {
    match servers.iter_mut().find(|s| s.address == server.address) {
        Some(existing) => {
            *existing = server;
            true
        }
        None => {
            servers.push(server);
            false
        }
    }
}

/// Upserts every entry of `incoming` in input order; on a shared address the
/// incoming entry wins.
pub fn merge_by_address(
    servers: &mut Vec<ServerDescriptor>,
    incoming: Vec<ServerDescriptor>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for server in incoming {
        if upsert_by_address(servers, server) {
            summary.replaced += 1;
        } else {
            summary.added += 1;
        }
    }
    summary
}
