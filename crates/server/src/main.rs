use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use pressai_server::analytics_factory::create_analytics_store;
use pressai_server::api::{AppState, router};
use pressai_server::audit_factory::create_audit_store;
use pressai_server::auth::AuthProvider;
use pressai_server::config::PressaiConfig;
use pressai_server::error::ServerError;
use pressai_server::telemetry;

/// PressAI audit/analytics HTTP server.
#[derive(Parser, Debug)]
#[command(name = "pressai-server", about = "Audit trail and correction recording for PressAI")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "pressai.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run database migrations for configured backends, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();

    telemetry::init();

    let mut config = if Path::new(&cli.config).exists() {
        PressaiConfig::load(&cli.config)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        PressaiConfig::default()
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Store construction runs migrations; the migrate subcommand stops there.
    let audit = create_audit_store(&config.audit).await?;
    let analytics = create_analytics_store(&config.analytics).await?;

    if let Some(Commands::Migrate) = cli.command {
        info!("migrations complete");
        return Ok(());
    }

    let auth = if config.auth.enabled {
        Some(Arc::new(AuthProvider::new(&config.auth.api_keys)))
    } else {
        None
    };

    let state = AppState {
        audit,
        analytics,
        auth,
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "pressai-server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install ctrl-c handler");
    }
}
