use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comparison::{ComparisonEngine, ProjectReport, RankField, SortDirection};
use configuration::{Config, LoggingSettings, OutputFormat};
use emissions::EmissionsAggregator;
use serde::Serialize;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod loader;
mod render;

/// The main entry point for the tokenflow emission engine.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load TOKENFLOW_* overrides from a .env file when one is present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    // The guard flushes the log file on drop, so it lives until main returns.
    let _log_guard = init_tracing(&config.logging)?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format.unwrap_or(config.output.format)
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Schedule(args) => handle_schedule(args, &config, format).await,
        Commands::Analyze(args) => handle_analyze(args, &config, format).await,
        Commands::Compare(args) => handle_compare(args, &config, format).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Token emission and vesting schedule analytics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format; overrides `output.format` from the configuration.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, conflicts_with = "format")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month-by-month emission schedule of one project.
    Schedule(ProjectArgs),
    /// Print unlock value and supply analytics for one project.
    Analyze(ProjectArgs),
    /// Rank and compare many projects side by side.
    Compare(CompareArgs),
}

#[derive(Args)]
struct ProjectArgs {
    /// The project document (JSON) to analyze.
    #[arg(long)]
    input: PathBuf,

    /// Analysis window in months (capped by `engine.max_window_months`).
    #[arg(long)]
    months: Option<usize>,
}

#[derive(Args)]
struct CompareArgs {
    /// The project documents (JSON) to compare.
    #[arg(long, num_args = 1.., required = true)]
    inputs: Vec<PathBuf>,

    /// The column to rank projects by.
    #[arg(long, value_enum, default_value_t = RankField::TotalUnlockValue)]
    sort_by: RankField,

    /// Rank in ascending order instead of descending.
    #[arg(long)]
    ascending: bool,

    /// Analysis window in months (capped by `engine.max_window_months`).
    #[arg(long)]
    months: Option<usize>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily rolling file when configured.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .context("Invalid logging.level filter")?;

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "tokenflow.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}

// ==============================================================================
// Command Handlers
// ==============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleOutput<'a> {
    name: &'a str,
    symbol: &'a str,
    month_labels: Vec<String>,
    emissions: &'a core_types::ProjectEmissions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareOutput {
    rankings: Vec<comparison::ComparisonRow>,
    inflation_periods: Vec<comparison::InflationPeriodRow>,
    market_emissions: Vec<comparison::MarketEmissionsRow>,
    missing: Vec<loader::MissingProject>,
}

/// Handles `schedule`: aggregates one project's allocations and prints the series.
async fn handle_schedule(args: ProjectArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let doc = loader::load_project(&args.input).await?;
    let window = config.engine.resolve_window(args.months);
    let emissions = EmissionsAggregator::new().aggregate(&doc.allocations, window);

    tracing::info!(
        project = %doc.name,
        allocations = doc.allocations.len(),
        window,
        "Computed emission schedule."
    );

    match format {
        OutputFormat::Json => print_json(&ScheduleOutput {
            name: &doc.name,
            symbol: &doc.symbol,
            month_labels: (0..window)
                .map(|m| core_types::month_label(doc.tge_date, m))
                .collect(),
            emissions: &emissions,
        }),
        OutputFormat::Table => {
            println!("{} ({})", doc.name, doc.symbol);
            println!("{}", render::schedule_table(&emissions, doc.tge_date));
            if !emissions.cliff_events.is_empty() {
                println!("\nCliff events");
                println!("{}", render::cliff_events_table(&emissions, doc.tge_date));
            }
            Ok(())
        }
    }
}

/// Handles `analyze`: runs aggregation and analytics for one project.
async fn handle_analyze(args: ProjectArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let doc = loader::load_project(&args.input).await?;
    let window = config.engine.resolve_window(args.months);
    let tge_date = doc.tge_date;
    let report = ProjectReport::from_allocations(doc.name, doc.symbol, doc.market, &doc.allocations, window);

    tracing::info!(project = %report.name, window, "Computed project analytics.");

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            println!("{} ({})", report.name, report.symbol);
            println!("{}", render::analytics_table(&report, tge_date));
            Ok(())
        }
    }
}

/// Handles `compare`: loads every document concurrently, then runs the comparison read models.
///
/// Documents that cannot be read or parsed are listed as missing instead of failing the batch.
async fn handle_compare(args: CompareArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let window = config.engine.resolve_window(args.months);
    let loaded = loader::load_projects(&args.inputs).await?;

    for missing in &loaded.missing {
        tracing::warn!(path = %missing.path.display(), reason = %missing.reason, "Project is missing from the comparison.");
    }

    let projects: Vec<ProjectReport> = loaded
        .documents
        .into_iter()
        .map(|doc| {
            ProjectReport::from_allocations(doc.name, doc.symbol, doc.market, &doc.allocations, window)
        })
        .collect();

    let direction = if args.ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    let engine = ComparisonEngine::new();
    let output = CompareOutput {
        rankings: engine.rank(&projects, args.sort_by, direction),
        inflation_periods: engine.inflation_periods(&projects),
        market_emissions: engine.market_emissions(&projects),
        missing: loaded.missing,
    };

    tracing::info!(
        compared = projects.len(),
        missing = output.missing.len(),
        window,
        "Comparison complete."
    );

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => {
            println!("Rankings");
            println!("{}", render::ranking_table(&output.rankings));
            println!("\nAnnualized emission inflation (%)");
            println!("{}", render::inflation_table(&output.inflation_periods));
            println!("\nMarket-wide unlock value");
            println!("{}", render::market_table(&output.market_emissions));
            if !output.missing.is_empty() {
                println!("\nMissing projects");
                println!("{}", render::missing_table(&output.missing));
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
