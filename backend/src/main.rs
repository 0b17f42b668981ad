mod api;
mod demo;

use std::net::SocketAddr;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;
use tosla::{Environment, Tosla, ToslaOptions};
use tracing_subscriber::EnvFilter;

lazy_static! {
    static ref CONFIG: MainConfig =
        envy::from_env::<MainConfig>().expect("TOSLA_* environment is incomplete");
}

#[derive(Deserialize, Debug)]
struct MainConfig {
    #[serde(rename = "tosla_api_user")]
    api_user: String,
    #[serde(rename = "tosla_api_pass")]
    api_pass: String,
    #[serde(rename = "tosla_client_id")]
    client_id: String,
    #[serde(rename = "tosla_environment", default)]
    environment: Environment,
    #[serde(rename = "tosla_bind_addr", default = "default_bind_addr")]
    bind_addr: SocketAddr,
    #[serde(rename = "tosla_callback_url", default = "default_callback_url")]
    callback_url: String,
    #[serde(rename = "tosla_run_demo", default)]
    run_demo: bool,
    #[serde(rename = "tosla_demo_expire_date", default = "demo::default_expire_date")]
    demo_expire_date: String,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8888))
}

fn default_callback_url() -> String {
    "http://localhost:8888/3dsconfirm".to_string()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Can't listen for shutdown signal");
    }

    tracing::info!("Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tosla = Arc::new(Tosla::with_options(ToslaOptions::new(
        CONFIG.environment,
        &CONFIG.api_user,
        &CONFIG.api_pass,
        &CONFIG.client_id,
    )));
    tracing::info!(environment = %CONFIG.environment, base_url = tosla.base_url(), "Gateway client ready");

    if CONFIG.run_demo {
        demo::run(&tosla, &CONFIG.callback_url, &CONFIG.demo_expire_date).await?;
    }

    let app = api::router(tosla);

    tracing::info!(addr = %CONFIG.bind_addr, "Listening");

    axum::Server::bind(&CONFIG.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
