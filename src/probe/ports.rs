use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpStream, lookup_host};

use crate::common::server::PortSpec;
use crate::probe::probe_error::ProbeError;

/// Probes each port with a TCP connect. Returns one entry per requested port:
/// `true` when the connect completed within `connect_timeout`, `false` for
/// anything else (refused, timed out, unresolvable).
pub async fn probe_ports(
    address: &str,
    ports: &[PortSpec],
    connect_timeout: Duration,
) -> BTreeMap<u16, bool> {
    let mut results = BTreeMap::new();
    for spec in ports {
        let open = match connect_once(address, spec.port_number, connect_timeout).await {
            Ok(peer) => {
                log::debug!("{}:{} ({}) open via {}", address, spec.port_number, spec.label, peer);
                true
            }
            Err(e) => {
                log::debug!("{}:{} ({}) closed: {}", address, spec.port_number, spec.label, e);
                false
            }
        };
        results.insert(spec.port_number, open);
    }
    results
}

pub(crate) async fn connect_once(
    address: &str,
    port: u16,
    connect_timeout: Duration,
) -> Result<SocketAddr, ProbeError> {
    let attempt = async {
        let target = lookup_host((address.trim(), port))
            .await
            .map_err(|e| ProbeError::Resolution(e.to_string()))?
            .next()
            .ok_or_else(|| ProbeError::Resolution(format!("no addresses for {address}")))?;
        let stream = TcpStream::connect(target).await?;
        Ok::<SocketAddr, ProbeError>(stream.peer_addr().unwrap_or(target))
    };

    match tokio::time::timeout(connect_timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(connect_timeout.as_millis())),
    }
}
