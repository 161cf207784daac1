//! Service entry point: connect to PostgreSQL, then serve the HTTP API.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use usuarios::config::{DatabaseSettings, ServiceSettings};
use usuarios::domain::TokioSleeper;
use usuarios::inbound::http::health::HealthState;
use usuarios::outbound::persistence::connect_with_retry;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
///
/// Returns an error, and so exits with status 1, when settings are invalid or
/// the database never becomes reachable.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let database = DatabaseSettings::from_env()?;
    let service = ServiceSettings::from_env()?;

    let pool = connect_with_retry(&database, service.retry_policy(), &TokioSleeper)
        .await
        .wrap_err("startup aborted")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(pool).with_missing_user_policy(service.missing_user_policy());
    let server = create_server(health_state, config).wrap_err("failed to bind HTTP listener")?;
    server.await.wrap_err("HTTP server terminated")?;
    Ok(())
}
