//! news-harvest main entry point
//!
//! This is the command-line interface for the news-harvest crawler.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use news_harvest::config::{load_config_with_hash, Config};
use news_harvest::crawler::{crawl_source, split_quota, CrawlOptions};
use news_harvest::export::{export_result, DateLayout, OutputFormat};
use news_harvest::session::BrowserLauncher;
use news_harvest::Source;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// news-harvest: incremental news crawler
///
/// Drives a headless Chrome through a news feed until the requested number of
/// articles is listed, reads every article page, and writes the result to a
/// .csv or .xlsx file.
#[derive(Parser, Debug)]
#[command(name = "news-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Incremental news crawler", long_about = None)]
struct Cli {
    /// News source: rt, kp, iz, tvrain or panorama
    #[arg(value_name = "SOURCE")]
    source: Source,

    /// Number of articles to collect
    #[arg(short = 'n', long, default_value_t = 10)]
    news_num: usize,

    /// Output file (.csv or .xlsx)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Category to crawl, repeatable (panorama only)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// First archive day to crawl backwards from (panorama only)
    #[arg(long, value_name = "YYYY-MM-DD")]
    from_date: Option<NaiveDate>,

    /// Date layout in the output: day-month-year or month-day-year
    #[arg(long, value_name = "LAYOUT")]
    date_format: Option<DateLayout>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(layout) = cli.date_format {
        config.export.date_format = layout;
    }
    if cli.headful {
        config.browser.headless = false;
    }

    // Reject the output path before any browsing happens
    let format = OutputFormat::from_path(&cli.output)?;
    format.sink(&config.export)?;

    let options = CrawlOptions {
        categories: (!cli.categories.is_empty()).then(|| cli.categories.clone()),
        from_date: cli.from_date,
    };

    if cli.dry_run {
        print_plan(&cli, &config, format, &options);
        return Ok(());
    }

    tracing::info!("Collecting {} articles from {}", cli.news_num, cli.source);

    let launcher = BrowserLauncher::new(config.browser.clone());
    let result = crawl_source(cli.source, cli.news_num, &config, &launcher, &options)
        .await
        .with_context(|| format!("crawl of {} failed", cli.source))?;

    let written = export_result(&result, &cli.output, &config.export)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("✓ {} articles written to {}", written, cli.output.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn,news_harvest=info,chromiumoxide=off"),
            1 => EnvFilter::new("info,news_harvest=debug,chromiumoxide=off"),
            2 => EnvFilter::new("debug,news_harvest=trace,chromiumoxide=off"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved crawl plan
fn print_plan(cli: &Cli, config: &Config, format: OutputFormat, options: &CrawlOptions) {
    let timings = config.timings_for(cli.source);

    println!("=== news-harvest Dry Run ===\n");

    println!("Source: {}", cli.source);
    println!("  Articles requested: {}", cli.news_num);
    if cli.source.has_categories() {
        println!("  Pagination: one archive day at a time until the quota is met");
    } else {
        println!("  Items per page: {}", timings.list_item_count);
        println!(
            "  Pagination rounds (max): {}",
            timings.pagination_rounds(cli.news_num)
        );
    }
    println!("  Pagination delay: {:?}", timings.pagination_delay);
    println!(
        "  Detail delay: {:?} every {} article(s)",
        timings.detail_delay, timings.detail_sleep_every
    );

    if cli.source.has_categories() {
        let categories = options
            .categories
            .clone()
            .or_else(|| config.categories_for(cli.source).map(<[String]>::to_vec))
            .unwrap_or_else(|| cli.source.default_categories());
        let shares = split_quota(cli.news_num, categories.len());

        println!("\nCategories ({}):", categories.len());
        for (category, share) in categories.iter().zip(shares) {
            println!("  - {} ({} articles)", category, share);
        }
        if let Some(day) = options.from_date {
            println!("  Starting from: {}", day);
        }
    }

    println!("\nBrowser:");
    println!("  Headless: {}", config.browser.headless);
    println!(
        "  Window: {}x{}",
        config.browser.window_width, config.browser.window_height
    );
    println!("  Page load timeout: {:?}", config.browser.page_load_timeout());

    println!("\nOutput: {} ({:?})", cli.output.display(), format);
    println!("  Date format: {}", config.export.date_format);

    println!("\n✓ Configuration is valid");
}
