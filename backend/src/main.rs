//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chengyu_backend::inbound::http::health::HealthState;
use chengyu_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use chengyu_backend::settings::ServerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let mut config =
        ServerConfig::new(bind_addr).with_json_limit_bytes(settings.json_limit_bytes());

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(database_url)
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
        }
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }
    if let Some(api_key) = settings.imgbb_api_key() {
        config = config.with_imgbb_api_key(api_key);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "chengyu backend listening");
    server.await
}
