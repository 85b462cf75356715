use std::net::{IpAddr, SocketAddr};

use anyhow::bail;
use clap::Parser;

/// Runtime settings. Every flag can also come from the environment (or a
/// `.env` file loaded before parsing).
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-catalog", version, about = "Movie catalog REST API")]
pub struct Config {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Keep everything in process memory instead of Postgres.
    #[arg(long, env = "CATALOG_IN_MEMORY")]
    pub in_memory: bool,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        match self.database_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => bail!("DATABASE_URL must be set unless --in-memory is used"),
        }
    }
}
