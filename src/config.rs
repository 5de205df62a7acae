use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_string("CATALOG_BIND_ADDR", "127.0.0.1:3001")
            .parse::<SocketAddr>()
            .context("CATALOG_BIND_ADDR must be a valid host:port")?;

        let data_path = PathBuf::from(env_string("CATALOG_DATA_PATH", "data/items.json"));

        Ok(Self {
            bind_addr,
            data_path,
        })
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
