//! HTTP server startup and lifecycle management.

use std::future::{Future, IntoFuture};
use std::io;
use std::net::SocketAddr;
use std::pin::pin;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::{Result, ServerError, TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// Validates the configuration, binds to the configured address, and serves
/// requests until a shutdown signal arrives. Connection info is attached so
/// the per-IP rate limiter can resolve the client address. Once shutdown
/// begins, in-flight requests get at most the configured drain window before
/// remaining connections are dropped.
pub async fn serve_http(app: Router, config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = config.validate() {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %validation_error,
            "invalid server configuration"
        );

        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = config.server_addr();

    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                "successfully bound to address"
            );

            listener
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                error = %error,
                "failed to bind to address"
            );

            return Err(ServerError::bind(server_addr.to_string(), error));
        }
    };

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "server is bound to all interfaces, ensure firewall rules are properly configured"
        );
    }

    // The oneshot marks the moment the drain phase begins, so its window can
    // be bounded separately from the server's total lifetime.
    let (drain_tx, drain_rx) = oneshot::channel();

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(());
    });

    run_until_drained(server.into_future(), drain_rx, config.shutdown_timeout()).await
}

/// Runs the server future to completion, bounding the drain phase.
///
/// Until `drain_started` fires, the server runs unbounded. After it fires the
/// server is only draining in-flight requests, and `drain_timeout` caps how
/// long that may take before the remaining connections are dropped.
async fn run_until_drained<F>(
    server: F,
    drain_started: oneshot::Receiver<()>,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let mut server = pin!(server);
    let mut drain_started = pin!(drain_started);

    tokio::select! {
        result = &mut server => return finish(result),
        _ = &mut drain_started => {}
    }

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => finish(result),
        Err(_) => {
            tracing::warn!(
                target: TRACING_TARGET_SHUTDOWN,
                timeout_secs = drain_timeout.as_secs(),
                "drain window elapsed, dropping remaining connections"
            );

            Ok(())
        }
    }
}

/// Maps the server's exit into the relay's result, logging either way.
fn finish(result: io::Result<()>) -> Result<()> {
    match result {
        Ok(()) => {
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, "server shut down gracefully");
            Ok(())
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "server encountered an error"
            );

            Err(ServerError::Runtime(error))
        }
    }
}

/// Resolves once the process is asked to stop (SIGINT or SIGTERM).
///
/// A signal source whose handler cannot be installed is logged and parked
/// forever rather than treated as an immediate stop request.
async fn shutdown_signal() {
    use tokio::signal;

    let interrupt = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "interrupt signal handler could not be installed"
            );
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %error,
                    "SIGTERM handler could not be installed"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        "shutdown signal received, draining in-flight requests"
    );
}
