use crate::store::labels::MAX_LABEL_BYTES;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub limits: Limits,
    pub paths: Paths,
    pub web: Web,
    pub logging: Logging,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Server {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1".to_string(), port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Limits {
    pub max_label_kb: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_label_kb: MAX_LABEL_BYTES / 1024 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Paths {
    /// Re-check containment against symlink-resolved paths.
    pub symlink_check: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Web {
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Logging {
    pub format: LogFormat,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.socket_addr()?;
        if self.limits.max_label_kb == 0 { anyhow::bail!("max_label_kb must be > 0"); }
        if let Some(dir) = &self.web.assets_dir {
            if !dir.is_dir() {
                anyhow::bail!("assets_dir does not exist or is not a directory: {}", dir.display());
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.bind_addr, self.server.port);
        addr.parse().map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
    }

    pub fn max_label_bytes(&self) -> usize {
        self.limits.max_label_kb * 1024
    }
}
