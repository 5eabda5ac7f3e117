use serde::{Deserialize, Serialize};

use crate::common::liveness::{LivenessRecord, Reachability};
use crate::common::server::ServerDescriptor;
use crate::probe::status_cache::StatusCache;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Online,
    Offline,
    Unknown,
}

impl StatusFilter {
    fn matches(&self, reachable: Reachability) -> bool {
        matches!(
            (self, reachable),
            (StatusFilter::Online, Reachability::Reachable)
                | (StatusFilter::Offline, Reachability::Unreachable)
                | (StatusFilter::Unknown, Reachability::Unknown)
        )
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub status: Option<StatusFilter>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ServerRow {
    pub server: ServerDescriptor,
    pub liveness: LivenessRecord,
}

#[derive(Debug, Serialize, Clone)]
pub struct ServerPage {
    pub rows: Vec<ServerRow>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

fn matches_search(server: &ServerDescriptor, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    server.name.to_lowercase().contains(&needle)
        || server.address.to_lowercase().contains(&needle)
        || server
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Upper bound on rows per page, whatever the caller asks for.
pub const MAX_PAGE_SIZE: usize = 500;

/// Filters `servers` against `query`, joins each hit with its cached liveness
/// and cuts the requested page. Pages are 1-based; a page past the end is
/// returned empty rather than clamped.
pub fn run_query(
    servers: &[ServerDescriptor],
    cache: &StatusCache,
    query: &ServerQuery,
    default_page_size: usize,
) -> ServerPage {
    let per_page = query
        .per_page
        .unwrap_or(default_page_size)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);

    let matching: Vec<ServerRow> = servers
        .iter()
        .filter(|s| {
            query
                .search
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .is_none_or(|n| matches_search(s, n.trim()))
        })
        .filter(|s| query.tag.as_deref().is_none_or(|t| s.has_tag(t)))
        .map(|s| ServerRow {
            server: s.clone(),
            liveness: cache.get_record(&s.address).unwrap_or_default(),
        })
        .filter(|row| {
            query
                .status
                .is_none_or(|f| f.matches(row.liveness.reachable))
        })
        .collect();

    let total = matching.len();
    let total_pages = total.div_ceil(per_page);
    let rows = matching
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    ServerPage {
        rows,
        page,
        per_page,
        total,
        total_pages,
    }
}
