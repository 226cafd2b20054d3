use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use filmdb_types::config::BackendConfig;

const DEFAULT_STATIC_DIR: &str = "client";

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Film catalog server")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 8080,
        env = "FILMDB_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "FILMDB_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[command(flatten)]
    pub backend: BackendConfig,

    #[arg(
        long,
        env = "FILMDB_STATIC_DIR",
        help = "Directory with web client, default is ./client if it exists"
    )]
    static_dir: Option<PathBuf>,

    #[arg(long, env = "FILMDB_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.backend.data_dir()
    }

    pub fn database_url(&self) -> String {
        self.backend.database_url()
    }

    pub fn static_dir(&self) -> Option<PathBuf> {
        self.static_dir.clone().or_else(|| {
            let dir = PathBuf::from(DEFAULT_STATIC_DIR);
            dir.is_dir().then_some(dir)
        })
    }
}
