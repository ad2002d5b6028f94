//! # BBC News Search
//!
//! Queries the NewsAPI `everything` endpoint for BBC News articles, optionally
//! filtered by keyword and publish-date range, and prints a plain-text digest
//! of each result.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... bbc_news_search -k football -f 2025-05-01 -t 2025-05-06
//! ```
//!
//! ## Pipeline
//!
//! 1. **Configuration**: load `.env`, resolve the API key
//! 2. **Validation**: check keyword and dates
//! 3. **Fetch**: one GET to NewsAPI
//! 4. **Output**: print the digest
//!
//! Failures are rendered once, as `ERROR: <message>` on stderr, and the
//! process exits with a code specific to the failure kind.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod filter;
mod models;
mod output;
mod utils;

use api::{HttpTransport, Transport, fetch_articles};
use cli::Cli;
use config::Config;
use error::AppError;
use filter::RequestFilter;
use models::Article;

/// Log filter used when `RUST_LOG` is unset. Quiet enough that a failed run
/// prints nothing but its `ERROR:` line.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // .env must be loaded before clap resolves `env = "NEWS_API_KEY"`
    config::load_dotenv();

    let args = Cli::parse();
    debug!(?args.keyword, ?args.from_date, ?args.to_date, "Parsed CLI arguments");

    match search(&args, |config| HttpTransport::new(config.timeout())).await {
        Ok(articles) => {
            output::print_summary(&articles);
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(kind = e.kind(), error = ?e, "Search failed");
            eprintln!("{}", render_error(&e));
            e.exit_code()
        }
    }
}

/// The single line shown for a failed run.
///
/// Multi-line messages (an HTML error page, a pretty-printed payload) are
/// folded onto one line.
fn render_error(e: &AppError) -> String {
    let message = e
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("ERROR: {message}")
}

/// Resolve configuration, then run the pipeline.
///
/// `connect` builds the transport and is only called once the credential
/// has been resolved.
async fn search<T, F>(args: &Cli, connect: F) -> Result<Vec<Article>, AppError>
where
    T: Transport,
    F: FnOnce(&Config) -> Result<T, AppError>,
{
    let config = Config::from_api_key(args.api_key.clone())?;
    let transport = connect(&config)?;
    run(args, &config, &transport).await
}

/// Validate the filters and fetch matching articles.
///
/// Validation failures return before the transport is touched.
#[instrument(level = "info", skip_all)]
async fn run<T: Transport>(
    args: &Cli,
    config: &Config,
    transport: &T,
) -> Result<Vec<Article>, AppError> {
    let start_time = std::time::Instant::now();

    let filter = RequestFilter::from_cli(args)?;
    let articles = fetch_articles(transport, config, &filter).await?;

    let elapsed = start_time.elapsed();
    info!(
        count = articles.len(),
        millis = elapsed.as_millis() as u64,
        "Search complete"
    );
    Ok(articles)
}
