use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ecodash_core::pages::{all_page_descriptors, render_page, Page, PageRequest};
use ecodash_parser::DatasetCache;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod output;
mod settings;

/// Derives the CO₂ emissions dashboard tables from an emissions CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emissions CSV (falls back to ECODASH_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Dashboard config TOML (falls back to ECODASH_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the dashboard pages
    Pages,
    /// Derive and print every panel of one page
    Render(RenderArgs),
    /// Print a summary of the loaded dataset as JSON
    Summary,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Page slug, e.g. global-trend
    #[arg(long)]
    page: Page,
    /// Selected year; clamped to the configured bounds
    #[arg(long)]
    year: Option<i64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Rows shown per panel in table format
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Pages => handle_pages(),
        Command::Render(args) => handle_render(cli.data, cli.config, args),
        Command::Summary => handle_summary(cli.data),
    }
}

fn handle_pages() -> Result<()> {
    println!("{}", output::page_catalog_table(all_page_descriptors()));
    Ok(())
}

fn handle_render(data: Option<PathBuf>, config: Option<PathBuf>, args: RenderArgs) -> Result<()> {
    let config = settings::load_config(config)?;
    let path = settings::data_path(data)?;
    let mut cache = DatasetCache::new();
    let dataset = cache
        .load(&path)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    let bounds = config.year_bounds;
    let requested = args.year.unwrap_or(bounds.default);
    let year = bounds.clamp(requested);
    if year != requested {
        warn!(
            requested,
            year,
            min = bounds.min,
            max = bounds.max,
            "Year outside the configured bounds, clamping"
        );
    }

    let request = PageRequest {
        page: args.page,
        year,
    };
    let page = render_page(&dataset.df, &request, &config)
        .with_context(|| format!("failed to render page {}", args.page))?;

    match args.format {
        OutputFormat::Table => print!("{}", output::page_text(&page, args.limit)?),
        OutputFormat::Json => {
            let json = output::page_json(&page)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn handle_summary(data: Option<PathBuf>) -> Result<()> {
    let path = settings::data_path(data)?;
    let mut cache = DatasetCache::new();
    let dataset = cache
        .load(&path)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    let summary = dataset.summary()?;
    info!(rows = summary.rows, territories = summary.territories, "Summarized dataset");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
