pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;
pub mod validations;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, bail};
use log::info;
use std::sync::Arc;

use crate::{
    config::database::{Store, StoreConfig},
    constants::{SERVER_ADDR, USE_DIRECT_MONGO},
    routes::dashboard_routes::configure_dashboard_routes,
    services::data_service::DataService,
    utils::auth_utils::AuthConfig,
};

/// Only the direct store backend exists; asking for the remote API backend is
/// a configuration error rather than a silent fallback.
pub fn ensure_direct_backend(flag: &str) -> anyhow::Result<()> {
    match flag.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" => Ok(()),
        other => bail!("USE_DIRECT_MONGO={other}: only the direct MongoDB backend is available"),
    }
}

pub async fn start_server() -> anyhow::Result<()> {
    ensure_direct_backend(&USE_DIRECT_MONGO)?;

    let store_config = StoreConfig::from_env();
    info!(
        "Store configured with {} connection attempt(s), connecting on first use",
        store_config.connect_attempts
    );
    let data_service = Arc::new(DataService::new(Arc::new(Store::new(store_config))));
    let data_service_data = web::Data::new(data_service);
    let auth_config_data = web::Data::new(AuthConfig::from_env());

    let address = SERVER_ADDR.clone();
    info!("Starting dashboard on {}", address);

    HttpServer::new(move || {
        App::new().configure(|cfg| {
            configure_dashboard_routes(cfg, data_service_data.clone(), auth_config_data.clone())
        })
    })
    .bind(&address)
    .with_context(|| format!("failed to bind {address}"))?
    .run()
    .await
    .context("dashboard server stopped with an error")?;

    info!("Dashboard shut down");
    Ok(())
}
