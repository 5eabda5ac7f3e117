use crate::common::server::ServerDescriptor;
use crate::storage::server_store_impl::ServerStoreImpl;
use crate::traits::server_store::ServerStore;
use anyhow::{Context, Result, bail};
use std::fs::{File, create_dir_all};
use std::io::{BufReader, Write};
use std::path::{Component, Path, PathBuf};

pub use crate::common::server::ImportSummary;

/// Merges `incoming` into the stored list keyed by address. On collision the
/// incoming entry wins; new addresses are appended in input order.
pub async fn merge_servers(
    store: &ServerStoreImpl,
    incoming: Vec<ServerDescriptor>,
) -> Result<ImportSummary> {
    let summary = store.merge_servers(incoming).await?;
    log::info!(
        "Imported servers: {} added, {} replaced",
        summary.added,
        summary.replaced
    );
    Ok(summary)
}

pub async fn import_servers(store: &ServerStoreImpl, path: &Path) -> Result<ImportSummary> {
    let file = File::open(path).with_context(|| format!("opening import file {:?}", path))?;
    let incoming: Vec<ServerDescriptor> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing import file {:?}", path))?;
    merge_servers(store, incoming).await
}

/// Writes the full stored list to `path`, returning how many entries went out.
pub async fn export_servers(store: &ServerStoreImpl, path: &Path) -> Result<usize> {
    let servers = store.get_all_servers().await?;
    let json = serde_json::to_string_pretty(&servers)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating export file {:?}", path))?;
    file.write_all(json.as_bytes())?;
    log::info!("Exported {} server(s) to {:?}", servers.len(), path);
    Ok(servers.len())
}

/// Joins a caller-supplied relative path onto `base`. Absolute paths, drive
/// prefixes and `..` components are refused so the result stays under `base`.
pub fn resolve_transfer_path(base: &Path, requested: &Path) -> Result<PathBuf> {
    if requested.as_os_str().is_empty() {
        bail!("transfer path must not be empty");
    }
    let mut resolved = base.to_path_buf();
    for component in requested.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("transfer path {:?} must stay inside the transfer directory", requested)
            }
        }
    }
    if resolved == base {
        bail!("transfer path {:?} names no file", requested);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_under_base() {
        let base = Path::new("/srv/monitor/transfer");
        assert_eq!(
            resolve_transfer_path(base, Path::new("./backups/servers.json")).unwrap(),
            base.join("backups").join("servers.json")
        );
    }

    #[test]
    fn escaping_paths_are_refused() {
        let base = Path::new("/srv/monitor/transfer");
        assert!(resolve_transfer_path(base, Path::new("../servers.json")).is_err());
        assert!(resolve_transfer_path(base, Path::new("a/../../etc/passwd")).is_err());
        assert!(resolve_transfer_path(base, Path::new("/etc/passwd")).is_err());
        assert!(resolve_transfer_path(base, Path::new("")).is_err());
        assert!(resolve_transfer_path(base, Path::new(".")).is_err());
    }
}
