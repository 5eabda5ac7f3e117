use serde::Deserialize;
use std::time::Duration;
use anyhow::Result;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub host: String,
    pub port: u16,
    pub store_type: StorageType,
    pub servers_path: String,
    pub bundled_servers_path: Option<String>,
    /// Import/export requests over the API may only name files under this directory.
    pub transfer_dir: String,
    pub ping_program: String,
    pub ping_timeout_ms: Option<u64>,
    pub connect_timeout_ms: u64,
    pub refresh_interval_secs: Option<u64>,
    pub default_page_size: usize,
    pub log_level: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            store_type: StorageType::File,
            servers_path: "./data/servers.json".to_string(),
            bundled_servers_path: None,
            transfer_dir: "./data/transfer".to_string(),
            ping_program: "ping".to_string(),
            ping_timeout_ms: None,
            connect_timeout_ms: 2000,
            refresh_interval_secs: None,
            default_page_size: 20,
            log_level: "info".to_string(),
        }
    }
}

impl MonitorConfig {
    pub fn ping_timeout(&self) -> Option<Duration> {
        self.ping_timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Loads the monitor configuration.
///
/// Sources, lowest precedence first: built-in defaults, the optional file at
/// `path`, then `PACS_MONITOR_*` environment variables (a `.env` file is read
/// into the environment beforehand).
pub fn load_monitor_config(path: &str) -> Result<MonitorConfig> {
    dotenv::dotenv().ok();
    let defaults = MonitorConfig::default();
    let settings = config::Config::builder()
        .set_default("host", defaults.host)?
        .set_default("port", defaults.port as i64)?
        .set_default("store_type", "file")?
        .set_default("servers_path", defaults.servers_path)?
        .set_default("transfer_dir", defaults.transfer_dir)?
        .set_default("ping_program", defaults.ping_program)?
        .set_default("connect_timeout_ms", defaults.connect_timeout_ms as i64)?
        .set_default("default_page_size", defaults.default_page_size as i64)?
        .set_default("log_level", defaults.log_level)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("PACS_MONITOR").try_parsing(true))
        .build()?;
    let monitor_config = settings.try_deserialize::<MonitorConfig>()?;
    Ok(monitor_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_monitor_config("/nonexistent/monitor.toml").unwrap();
        assert_eq!(config.connect_timeout_ms, 2000);
        assert_eq!(config.store_type, StorageType::File);
        assert!(config.ping_timeout_ms.is_none());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.transfer_dir, "./data/transfer");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "store_type = \"memory\"\nping_timeout_ms = 1500\nport = 9090").unwrap();
        let config = load_monitor_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.store_type, StorageType::Memory);
        assert_eq!(config.ping_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.port, 9090);
        assert_eq!(config.servers_path, "./data/servers.json");
    }
}
