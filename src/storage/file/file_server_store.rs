use crate::common::server::{ImportSummary, ServerDescriptor, merge_by_address, upsert_by_address};
use crate::traits::server_store::UnsendServerStore;
use anyhow::Result;
use fs2::FileExt;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{ErrorKind::NotFound, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Server list kept as a pretty-printed JSON array in a single sidecar file.
///
/// Mutations are serialized by `write_lock` within the process and by an
/// exclusive `fs2` lock held from read to write across processes. Disk work
/// runs on the blocking pool.
pub struct FileServerStore {
    servers_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileServerStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            servers_path: path.as_ref().to_owned(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.servers_path
    }

    async fn load(&self) -> Result<Vec<ServerDescriptor>> {
        let path = self.servers_path.clone();
        tokio::task::spawn_blocking(move || read_servers(&path)).await?
    }

    /// Runs `f` on the stored list under both locks. The file is rewritten
    /// only when `f` reports a change.
    async fn modify<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Vec<ServerDescriptor>) -> (T, bool) + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.servers_path.clone();
        tokio::task::spawn_blocking(move || modify_servers(&path, f)).await?
    }
}

fn parse_servers(contents: &str) -> Result<Vec<ServerDescriptor>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(contents)?)
}

fn read_servers(path: &Path) -> Result<Vec<ServerDescriptor>> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    FileExt::lock_shared(&file)?;
    let mut contents = String::new();
    let read = file.read_to_string(&mut contents);
    FileExt::unlock(&file)?;
    read?;
    parse_servers(&contents)
}

fn modify_servers<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut Vec<ServerDescriptor>) -> (T, bool),
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)?;
    file.lock_exclusive()?;
    let result = rewrite_locked(&mut file, f);
    FileExt::unlock(&file)?;
    let (value, count) = result?;
    if let Some(count) = count {
        log::debug!("Wrote {} server(s) to {:?}", count, path);
    }
    Ok(value)
}

fn rewrite_locked<T, F>(file: &mut File, f: F) -> Result<(T, Option<usize>)>
where
    F: FnOnce(&mut Vec<ServerDescriptor>) -> (T, bool),
{
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let mut servers = parse_servers(&contents)?;
    let (value, changed) = f(&mut servers);
    if !changed {
        return Ok((value, None));
    }
    let json = serde_json::to_string_pretty(&servers)?;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok((value, Some(servers.len())))
}

impl UnsendServerStore for FileServerStore {
    async fn get_all_servers(&self) -> Result<Vec<ServerDescriptor>> {
        self.load().await
    }

    async fn get_server(&self, address: &str) -> Result<Option<ServerDescriptor>> {
        Ok(self.load().await?.into_iter().find(|s| s.address == address))
    }

    async fn save_server(&self, server: &ServerDescriptor) -> Result<()> {
        let server = server.clone();
        self.modify(move |servers| {
            upsert_by_address(servers, server);
            ((), true)
        })
        .await
    }

    async fn insert_server(&self, server: &ServerDescriptor) -> Result<bool> {
        let server = server.clone();
        self.modify(move |servers| {
            if servers.iter().any(|s| s.address == server.address) {
                return (false, false);
            }
            servers.push(server);
            (true, true)
        })
        .await
    }

    async fn update_server(&self, server: &ServerDescriptor) -> Result<bool> {
        let server = server.clone();
        self.modify(move |servers| match servers.iter_mut().find(|s| s.address == server.address) {
            Some(existing) => {
                *existing = server;
                (true, true)
            }
            None => (false, false),
        })
        .await
    }

    async fn delete_server(&self, address: &str) -> Result<bool> {
        let address = address.to_string();
        self.modify(move |servers| {
            let before = servers.len();
            servers.retain(|s| s.address != address);
            let removed = servers.len() != before;
            (removed, removed)
        })
        .await
    }

    async fn replace_all(&self, servers: &[ServerDescriptor]) -> Result<()> {
        let replacement = servers.to_vec();
        self.modify(move |servers| {
            *servers = replacement;
            ((), true)
        })
        .await
    }

    async fn merge_servers(&self, incoming: Vec<ServerDescriptor>) -> Result<ImportSummary> {
        self.modify(move |servers| {
            let summary = merge_by_address(servers, incoming);
            (summary, true)
        })
        .await
    }
}
