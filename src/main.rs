use api_client::{AlphaVantageClient, MarketDataClient};
use calculators::{create_calculator, CalculatorExt, CalculatorId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{load_settings, DateRange};
use core_types::{ColumnValues, Frame};
use std::sync::Arc;

/// The main entry point for the Meridian time-series application.
#[tokio::main]
async fn main() {
    // Load environment variables (the provider API key) from an optional .env file.
    dotenvy::dotenv().ok();

    // Keep the guard alive for the lifetime of the process so buffered log
    // lines are flushed on exit.
    let _guard = init_tracing();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = handle_run(args).await {
                eprintln!("Error running calculator: {e}");
                std::process::exit(1);
            }
        }
        Commands::Listings => {
            if let Err(e) = handle_listings().await {
                eprintln!("Error fetching listings: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Routes log output to a daily-rotated file, with the verbosity taken from
/// `RUST_LOG`.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "meridian.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Schema-validated time-series calculators for market data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a calculator over a date window and print the resulting frame.
    Run(RunArgs),

    /// Fetch the active-listings universe from the market-data provider.
    Listings,
}

#[derive(Parser)]
struct RunArgs {
    /// Which calculator to run ("stock-data" or "daily-returns").
    #[arg(long)]
    calculator: CalculatorId,

    /// The start date of the run window (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// The end date of the run window (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the orchestration of a single calculator run.
async fn handle_run(args: RunArgs) -> anyhow::Result<()> {
    tracing::info!(calculator = %args.calculator, from = %args.from, to = %args.to, "starting run");

    let settings = load_api_settings()?;
    let range = DateRange::from_dates(args.from, args.to)?;
    let client = Arc::new(AlphaVantageClient::new(&settings.api));

    let calculator = create_calculator(args.calculator, &settings, range, client)?;
    let frame = calculator.execute().await?;

    tracing::info!(rows = frame.height(), columns = frame.width(), "run complete");
    println!("{}", render_frame(&frame));
    Ok(())
}

/// Fetches and prints the active-listings universe.
async fn handle_listings() -> anyhow::Result<()> {
    let settings = load_api_settings()?;
    let client = AlphaVantageClient::new(&settings.api);
    let listings = client.fetch_active_listings().await?;

    let mut table = Table::new();
    table.set_header(vec!["SYMBOL", "NAME", "EXCHANGE", "TYPE", "IPO_DATE", "STATUS"]);
    for listing in &listings {
        table.add_row(vec![
            listing.symbol.clone(),
            listing.name.clone(),
            listing.exchange.clone(),
            listing.asset_type.clone(),
            listing
                .ipo_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            listing.status.clone(),
        ]);
    }
    println!("{table}");
    println!("{} active listings", listings.len());
    Ok(())
}

/// Loads `meridian.toml`, then lets the environment override the API key so
/// secrets stay out of the settings file.
fn load_api_settings() -> anyhow::Result<configuration::Settings> {
    let mut settings = load_settings()?;
    if let Ok(key) = std::env::var("MERIDIAN_API_KEY") {
        settings.api.key = key;
    }
    Ok(settings)
}

/// Renders a frame as an ASCII table, with typed headers and empty cells for
/// nulls.
fn render_frame(frame: &Frame) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .columns()
            .iter()
            .map(|c| format!("{} ({})", c.name(), c.dtype())),
    );

    for row in 0..frame.height() {
        let cells: Vec<String> = frame
            .columns()
            .iter()
            .map(|column| match column.values() {
                ColumnValues::Date(v) => v[row].map(|d| d.to_string()).unwrap_or_default(),
                ColumnValues::Utf8(v) => v[row].clone().unwrap_or_default(),
                ColumnValues::Float(v) => v[row].map(|f| format!("{f:.6}")).unwrap_or_default(),
                ColumnValues::Int(v) => v[row].map(|i| i.to_string()).unwrap_or_default(),
                ColumnValues::Boolean(v) => v[row].map(|b| b.to_string()).unwrap_or_default(),
            })
            .collect();
        table.add_row(cells);
    }

    table
}
