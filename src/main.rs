//! Title-Harvest main entry point
//!
//! Command-line interface: reads a title-id list, harvests one page per id
//! through the retrying transport, and writes the tidy CSV table plus a
//! summary.json report.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use title_harvest::config::DEFAULT_BASE_URL;
use title_harvest::output::{summarize, write_summary, write_table};
use title_harvest::{read_ids, ConfigError, CrawlConfig, Harvester, Outcome};
use tracing_subscriber::EnvFilter;

/// Exit status for a run with no valid input identifiers
const EXIT_NO_IDS: i32 = 2;

/// Title-Harvest: scrape catalog title pages into a tidy CSV + summary.json
#[derive(Parser, Debug)]
#[command(name = "title-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Scrape title pages -> tidy CSV + summary.json", long_about = None)]
struct Cli {
    /// Path to text file with title ids, one per line (lines like 'tt0111161')
    #[arg(long, value_name = "FILE")]
    ids: PathBuf,

    /// Output CSV path
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// Output summary JSON path
    #[arg(long, value_name = "FILE", default_value = "reports/summary.json")]
    summary: PathBuf,

    /// Seconds to sleep between requests (politeness)
    #[arg(long, default_value_t = 1.5)]
    sleep: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Base URL that ids are appended to
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Validate input before any network activity
    let ids = match read_ids(&cli.ids) {
        Ok(ids) => ids,
        Err(e @ ConfigError::NoValidIds { .. }) => {
            tracing::error!("{}", e);
            std::process::exit(EXIT_NO_IDS);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Loaded {} title ids from {}", ids.len(), cli.ids.display());

    let config = CrawlConfig {
        base_url: cli.base_url,
        delay: Duration::from_secs_f64(cli.sleep),
        timeout: Duration::from_secs(cli.timeout),
        ..CrawlConfig::default()
    };

    let harvester = Harvester::new(config)?;
    let report = harvester.run(&ids).await;

    tracing::info!(
        "Harvest finished: {} ok, {} http errors, {} errors",
        report.count(|o| *o == Outcome::Ok),
        report.count(|o| matches!(o, Outcome::HttpError(_))),
        report.count(|o| matches!(o, Outcome::Error(_)))
    );

    // The table and summary are written even if every identifier failed
    write_table(&cli.out, &report.records)?;
    tracing::info!("Saved CSV -> {}", cli.out.display());

    let summary = summarize(&report.records);
    write_summary(&cli.summary, &summary)?;
    tracing::info!("Saved summary -> {}", cli.summary.display());

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("title_harvest=info,warn"),
            1 => EnvFilter::new("title_harvest=debug,info"),
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
