mod config;
mod error;
mod handlers;
mod routes;
mod types;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use config::ServerConfig;
use gaia_client::{Backend, BackendConfig, HttpBackend, InMemoryBackend};
use handlers::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server = ServerConfig::from_env()?;
    let backend: Arc<dyn Backend> = match &server.fixture_path {
        Some(path) => {
            info!("serving canned fixture {}", path.display());
            Arc::new(InMemoryBackend::from_fixture_file(path)?)
        }
        None => {
            let cfg = BackendConfig::from_env();
            info!(host = %cfg.host, api_key_set = !cfg.api_key.is_empty(), "using remote backend");
            Arc::new(HttpBackend::new(cfg)?)
        }
    };
    if server.latent_routes {
        info!("dataset, search and discovery routes enabled");
    }

    let app = routes::create_router(AppState { backend }, server.latent_routes);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    match server.tls() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key)
                .await
                .context("failed to load TLS certificate or key")?;
            info!("https listening on {}", server.listen_addr);
            axum_server::bind_rustls(server.listen_addr, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("http listening on {}", server.listen_addr);
            axum_server::bind(server.listen_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}

async fn shutdown_on_signal(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
