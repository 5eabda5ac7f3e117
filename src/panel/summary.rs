use serde_json::json;
use std::collections::BTreeMap;

use crate::common::liveness::Reachability;
use crate::traits::panel::{Panel, PanelContext};

pub struct SummaryPanel;

impl Panel for SummaryPanel {
    fn name(&self) -> &str {
        "summary"
    }

    fn render(&self, ctx: &PanelContext<'_>) -> serde_json::Value {
        let mut counts: BTreeMap<&str, usize> =
            [("online", 0), ("offline", 0), ("unknown", 0)].into_iter().collect();
        let mut tags: BTreeMap<&str, usize> = BTreeMap::new();

        for server in ctx.servers {
            let bucket = match ctx.cache.get_reachability(&server.address) {
                Reachability::Reachable => "online",
                Reachability::Unreachable => "offline",
                Reachability::Unknown => "unknown",
            };
            *counts.entry(bucket).or_default() += 1;
            for tag in &server.tags {
                *tags.entry(tag.as_str()).or_default() += 1;
            }
        }

        json!({
            "total": ctx.servers.len(),
            "status": counts,
            "tags": tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::liveness::LivenessRecord;
    use crate::common::server::ServerDescriptor;
    use crate::probe::status_cache::StatusCache;

    #[test]
    fn counts_by_status_and_tag() {
        let servers = vec![
            ServerDescriptor::new("A", "1.1.1.1").with_tags(&["pacs"]),
            ServerDescriptor::new("B", "2.2.2.2").with_tags(&["pacs", "ris"]),
            ServerDescriptor::new("C", "3.3.3.3"),
        ];
        let cache = StatusCache::new();
        cache.set_record("1.1.1.1", LivenessRecord::from_probe(true, &Default::default()));
        cache.set_record("2.2.2.2", LivenessRecord::from_probe(false, &Default::default()));

        let value = SummaryPanel.render(&PanelContext {
            servers: &servers,
            cache: &cache,
        });
        assert_eq!(value["total"], 3);
        assert_eq!(value["status"]["online"], 1);
        assert_eq!(value["status"]["offline"], 1);
        assert_eq!(value["status"]["unknown"], 1);
        assert_eq!(value["tags"]["pacs"], 2);
    }
}
