use std::time::Duration;

use anyhow::{Result, anyhow};
use filmdb_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{debug, error};

pub mod rest;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Keeps temporary data directory and running server alive for the test duration
pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub fn test_config(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let args = &[
        "filmdb-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
            shutdown: None,
        },
    ))
}

pub fn base_url(config: &ServerConfig) -> Url {
    let url = format!("http://127.0.0.1:{}/", config.port);
    Url::parse(&url).expect("valid base url")
}

pub fn extend_url(url: &Url, segment: impl std::fmt::Display) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("base url")
        .pop_if_empty()
        .push(&segment.to_string());
    url
}

/// Creates configuration and prepared (migrated) database, server is not started yet
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let (args, guard) = test_config(test_name)?;
    tokio::fs::create_dir_all(args.data_dir()).await?;
    let pool = filmdb_dal::new_pool(&args.database_url()).await?;
    filmdb_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((args, guard))
}

/// Starts server in background and waits until it responds to health check
pub async fn spawn_server(args: ServerConfig, guard: &mut ConfigGuard) -> Result<reqwest::Client> {
    let health_url = base_url(&args).join("health")?;
    let state = filmdb_server::run::build_state(&args).await?;
    let (tx, rx) = oneshot::channel::<()>();
    guard.shutdown = Some(tx);

    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(e) = filmdb_server::run::run_graceful_with_state(args, state, shutdown).await {
            error!("Server error: {e}");
        }
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(client),
            Ok(response) => debug!("Server not ready: {}", response.status()),
            Err(e) => debug!("Server not ready: {e}"),
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Err(anyhow!("Server did not start"))
}

/// Prepares environment and launches server, returns client and base url
pub async fn launch_env(test_name: &str) -> Result<(reqwest::Client, Url, ConfigGuard)> {
    let (args, mut guard) = prepare_env(test_name).await?;
    let url = base_url(&args);
    let client = spawn_server(args, &mut guard).await?;
    Ok((client, url, guard))
}
