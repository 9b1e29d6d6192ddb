//! CLI argument and configuration handling.

mod server;

use clap::Parser;
pub use server::ServerConfig;
use ttrelay_server::middleware::RecoveryConfig;
use ttrelay_server::service::ServiceConfig;

/// Command-line interface for the ttrelay server.
#[derive(Debug, Parser)]
#[command(name = "ttrelay", version, about = "HTTP relay for short-video extraction")]
pub struct Cli {
    /// Network binding and lifecycle options.
    #[command(flatten)]
    pub server: ServerConfig,

    /// Cache, rate limit, and upstream options.
    #[command(flatten)]
    pub service: ServiceConfig,

    /// Recovery middleware options.
    #[command(flatten)]
    pub recovery: RecoveryConfig,
}

/// Logs the effective server configuration at startup.
pub fn log_server_config(config: &ServerConfig) {
    tracing::info!(
        target: crate::TRACING_TARGET_CONFIG,
        host = %config.host,
        port = config.port,
        shutdown_timeout_secs = config.shutdown_timeout,
        binds_to_all_interfaces = config.binds_to_all_interfaces(),
        "server configuration loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_with_defaults() {
        let cli = Cli::parse_from(["ttrelay"]);

        assert_eq!(cli.server.port, 10000);
        assert_eq!(cli.service.cache_ttl, 3600);
        assert_eq!(cli.service.rate_limit_max, 100);
        assert_eq!(cli.recovery.request_timeout, 30);
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "ttrelay",
            "--port",
            "8080",
            "--cache-ttl",
            "600",
            "--rate-limit-max",
            "10",
        ]);

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.service.cache_ttl, 600);
        assert_eq!(cli.service.rate_limit_max, 10);
    }
}
