use serde_json::json;

use crate::traits::panel::{Panel, PanelContext};

/// One row per server with its reachability and labelled port indicators.
pub struct ServerStatusPanel;

impl Panel for ServerStatusPanel {
    fn name(&self) -> &str {
        "server_status"
    }

    fn render(&self, ctx: &PanelContext<'_>) -> serde_json::Value {
        let rows: Vec<_> = ctx
            .servers
            .iter()
            .map(|server| {
                let record = ctx.cache.get_record(&server.address).unwrap_or_default();
                json!({
                    "name": server.name,
                    "ip": server.address,
                    "tags": server.tags,
                    "reachable": record.reachable,
                    "checkedAt": record.checked_at,
                    "ports": server.ports.iter().map(|p| json!({
                        "port": p.port_number,
                        "label": p.label,
                        "state": record.port_state(p.port_number),
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        json!({ "servers": rows })
    }
}
