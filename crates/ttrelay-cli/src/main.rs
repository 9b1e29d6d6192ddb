#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use axum_client_ip::ClientIpSource;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ttrelay_server::handler::routes;
use ttrelay_server::middleware::{RouterRateLimitExt, RouterRecoveryExt, RouterSecurityExt};
use ttrelay_server::service::ServiceState;

use crate::config::{Cli, log_server_config};

/// Tracing target for startup events.
pub const TRACING_TARGET_STARTUP: &str = "ttrelay_cli::startup";

/// Tracing target for shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "ttrelay_cli::shutdown";

/// Tracing target for configuration events.
pub const TRACING_TARGET_CONFIG: &str = "ttrelay_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    log_startup_info();
    log_server_config(&cli.server);

    cli.server
        .validate()
        .context("invalid server configuration")?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;
    let router = create_router(state, &cli);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Security - permissive CORS
/// 3. Client IP resolution - feeds the rate limiter
/// 4. Rate limiting - per-IP fixed-window admission control
/// 5. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    routes(state.clone())
        .with_rate_limiting(state)
        .layer(ClientIpSource::ConnectInfo.into_extension())
        .with_permissive_cors()
        .with_recovery(&cli.recovery)
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting ttrelay server"
    );
}
