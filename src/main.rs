use anyhow::Context;
use api_client::AlphaVantageClient;
use chrono::Utc;
use clap::{Parser, Subcommand};
use configuration::{Config, LogLevel};
use dashboard::{DashboardSettings, ViewModel};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use web_server::AppState;

/// The main entry point for the Stockscope dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (e.g. the provider API key) from a .env file, if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let _guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Serve(args) => handle_serve(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Price history, annualized return and volatility for a stock or ETF.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log level.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a ticker and print its dashboard.
    Report(ReportArgs),
    /// Serve the interactive dashboard over HTTP.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The ticker symbol (e.g., "AAPL"). Case-insensitive.
    #[arg(default_value = "")]
    ticker: String,

    /// Print the view model as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to listen on (overrides `server.addr`).
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Runs one dashboard cycle and prints the result.
async fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let client = AlphaVantageClient::new(&config.provider)?;
    let settings = DashboardSettings::from(&config.metrics);
    let as_of = Utc::now().date_naive();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Fetching {}...", args.ticker.trim().to_uppercase()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let view = dashboard::render(&client, &args.ticker, as_of, &settings).await;
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", dashboard::render_text(&view));
    }

    if let ViewModel::Unresolved { input, .. } = &view {
        tracing::debug!(input = %input, "Report finished without data.");
    }
    Ok(())
}

/// Starts the web server with the live provider.
async fn handle_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let addr = args.addr.unwrap_or(config.server.addr);
    let state = AppState::from_config(&config)?;
    web_server::run_server(addr, state).await
}
