//! felix-ui - Fix-It Felix diagnostic dashboard
//!
//! `felix-ui` (or `felix-ui serve`) runs the dashboard: browser UI plus the
//! `/api/analyze` proxy to the AI Engine.
//!
//! `felix-ui analyze` submits one image/context to a running dashboard and
//! prints the diagnostic report.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use felix_common::config::{self, ConfigOverrides, ServiceConfig};
use felix_common::{report, AnalysisRequest, AnalysisResponse, OperationMode};
use felix_ui::client::{self, DashboardClient, DEFAULT_DASHBOARD_URL};
use felix_ui::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for felix-ui
#[derive(Parser, Debug)]
#[command(name = "felix-ui")]
#[command(about = "Fix-It Felix diagnostic dashboard")]
#[command(version)]
struct Cli {
    /// Path to felix-ui.toml (default: FELIX_CONFIG, then the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dashboard server (default)
    Serve(ServeArgs),
    /// Submit an image and/or context to a running dashboard
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// AI Engine analyze endpoint
    #[arg(long)]
    engine_url: Option<String>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,

    /// Free-text context for the engine
    #[arg(long, default_value = "")]
    context: String,

    /// Processing tier: cloud, local or fast
    #[arg(long, default_value_t = OperationMode::Cloud)]
    mode: OperationMode,

    /// Dashboard base URL
    #[arg(long, default_value = DEFAULT_DASHBOARD_URL)]
    url: String,

    /// Print the raw JSON response instead of the report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Analyze(args)) => run_analyze(args).await,
        Some(Command::Serve(args)) => run_serve(cli.config, args).await,
        None => run_serve(cli.config, ServeArgs::default()).await,
    }
}

fn init_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}

async fn run_serve(config_path: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    // TOML is read before the subscriber exists so its logging level can apply
    let toml_path = config::config_file_path(config_path.as_deref());
    let toml_config = match &toml_path {
        Some(path) => config::load_toml_config(path)?,
        None => Default::default(),
    };

    init_tracing(&format!("{},tower_http=info", toml_config.logging.level));

    // Build identification first, before anything that can stall
    info!(
        "Starting Fix-It Felix dashboard (felix-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &toml_path {
        Some(path) if path.exists() => info!("Config file: {}", path.display()),
        Some(path) => info!("Config file {} not found, using defaults", path.display()),
        None => info!("No config directory on this platform, using defaults"),
    }

    let overrides = ConfigOverrides {
        bind_address: args.bind,
        port: args.port,
        engine_url: args.engine_url,
    };
    let config = ServiceConfig::resolve(&overrides, &toml_config)?;

    let state = AppState::from_config(&config).context("Failed to create AI Engine client")?;
    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("felix-ui listening on http://{}", addr);
    info!("Forwarding analysis requests to {}", config.engine_url);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    init_tracing("warn");

    let image = match &args.image {
        Some(path) => Some(
            client::load_image(path)
                .await
                .with_context(|| format!("Failed to read image {}", path.display()))?,
        ),
        None => None,
    };

    let request = match AnalysisRequest::new(image, args.context, args.mode) {
        Ok(request) => request,
        Err(_) => bail!("Nothing to analyze: pass --image and/or --context"),
    };

    let client = DashboardClient::new(args.url)?;
    let value = client.analyze(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let response: AnalysisResponse =
        serde_json::from_value(value).context("Unexpected response shape from dashboard")?;
    print!("{}", report::render(&response));

    if response.is_error() {
        bail!("AI Engine reported an error");
    }
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
