use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
            worker_threads: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_io_timeout")]
    pub io_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), io_timeout_ms: default_io_timeout() }
    }
}

impl StorageConfig {
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self { dir: default_static_dir() }
    }
}

/// Registry policy knobs.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RegistryConfig {
    /// Reject submissions whose materials are all blank after trimming.
    /// Off by default: such points are stored with an empty list.
    #[serde(default)]
    pub reject_blank_materials: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }
fn default_body_limit() -> usize { 200 * 1024 }
fn default_data_file() -> PathBuf { PathBuf::from("data/points.json") }
fn default_io_timeout() -> u64 { 5_000 }
fn default_static_dir() -> PathBuf { PathBuf::from("public") }
fn default_log_format() -> String { "compact".into() }

/// Load `CONFIG_PATH` (default `config.toml`). A missing file is not an error.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::metadata(&path) {
        Ok(_) => load_from_file(&path),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File config, then environment overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_overrides(|k| std::env::var(k).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(file) = lookup("DATA_FILE") {
            self.storage.data_file = PathBuf::from(file);
        }
        if let Some(ms) = lookup("STORE_IO_TIMEOUT_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            self.storage.io_timeout_ms = ms;
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            self.static_files.dir = PathBuf::from(dir);
        }
        if let Some(fmt) = lookup("LOG_FORMAT") {
            self.log.format = fmt;
        }
        if let Some(flag) = lookup("REJECT_BLANK_MATERIALS") {
            self.registry.reject_blank_materials = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.body_limit_bytes == 0 {
            return Err(anyhow!("server.body_limit_bytes must be > 0"));
        }
        if let Some(0) = self.worker_threads {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file is empty"));
        }
        if self.io_timeout_ms == 0 {
            return Err(anyhow!("storage.io_timeout_ms must be a positive number of milliseconds"));
        }
        Ok(())
    }
}
