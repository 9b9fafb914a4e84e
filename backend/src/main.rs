//! Folio entry-point: validates the environment, wires the Payload adapters
//! and serves the preview route and posts API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use folio::inbound::http::health::HealthState;
use server::{AppContainer, AppSettings, BuildMode, create_server};

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

    let env = DefaultEnv::new();
    let mode = BuildMode::from_env(&env);
    let settings = AppSettings::from_env(&env, mode).map_err(std::io::Error::other)?;
    let container = AppContainer::from_settings(&settings).map_err(std::io::Error::other)?;

    info!(
        mode = ?settings.mode,
        bind_addr = %settings.bind_addr,
        payload_url = %settings.payload_url,
        services = ?container.registered_keys(),
        "starting folio"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &container, &settings)?;
    server.await
}
