//! notebook-service
//!
//! Converts Jupyter notebooks to HTML behind an instrumented handler chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/v0/convert
//!  ─────────────────────▶ http::server ──▶ Instrumented ──▶ Logged ──▶ Traced ──▶ HtmlRenderer
//!                                              │              │          │
//!                                              ▼              ▼          ▼
//!                                          histograms,     one log    one span
//!                                          success count   entry      per call
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use notebook_service::config::{
    discover_config, search_paths, validate_config, ConfigError, HttpConfig, ServiceConfig,
};
use notebook_service::http::server::HEALTH_PATH;
use notebook_service::lifecycle::{self, signals, Shutdown};
use notebook_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "notebook-service", version)]
#[command(about = "Jupyter notebook to HTML conversion service", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, env = "NOTEBOOK_SERVICE_CONFIG_FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Set logging level
    #[arg(long, env = "NOTEBOOK_SERVICE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable pretty logging
    #[arg(long, env = "NOTEBOOK_SERVICE_LOG_PRETTY", global = true)]
    log_pretty: bool,

    /// Enable colored logging
    #[arg(long, env = "NOTEBOOK_SERVICE_LOG_COLOR", global = true)]
    log_color: bool,

    /// Address to bind http server
    #[arg(long, env = "NOTEBOOK_SERVICE_HTTP_ADDR", global = true)]
    http_addr: Option<String>,

    /// Root path of http server
    #[arg(long, env = "NOTEBOOK_SERVICE_HTTP_ROOT", global = true)]
    http_root: Option<String>,

    /// Address to bind the metrics endpoint
    #[arg(long, env = "NOTEBOOK_SERVICE_METRICS_ADDR", global = true)]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the conversion service (default)
    Server,
    /// Check the health of a running service
    Health,
}

impl Cli {
    /// Flags and environment override the config file.
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if self.log_pretty {
            config.log.pretty = true;
        }
        if self.log_color {
            config.log.color = true;
        }
        if let Some(addr) = &self.http_addr {
            config.http.addr = addr.clone();
        }
        if let Some(root) = &self.http_root {
            config.http.root = root.clone();
        }
        if let Some(addr) = &self.metrics_addr {
            config.metrics.addr = addr.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, source) = discover_config(cli.config_file.as_deref(), &search_paths())?;
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.log);

    match &source {
        Some(path) => tracing::info!(path = %path.display(), "Configuration loaded"),
        None => tracing::info!("Continue without config"),
    }

    match cli.command.unwrap_or(Commands::Server) {
        Commands::Server => run_server(config).await,
        Commands::Health => check_health(&config.http).await,
    }
}

async fn run_server(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        http_addr = %config.http.addr,
        metrics_enabled = config.metrics.enabled,
        metrics_addr = %config.metrics.addr,
        "notebook-service starting"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    lifecycle::serve(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn check_health(http: &HttpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut addr: SocketAddr = http.addr.parse()?;
    if addr.ip().is_unspecified() {
        addr.set_ip(Ipv4Addr::LOCALHOST.into());
    }
    let url = format!("http://{}{}{}", addr, http.root.trim_end_matches('/'), HEALTH_PATH);

    let res = reqwest::get(&url).await?;
    let status = res.status();
    if !status.is_success() {
        return Err(format!("health check at {url} returned {status}").into());
    }

    println!("{url}: {}", res.text().await?);
    Ok(())
}
