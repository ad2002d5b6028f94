//! Command-line interface definitions.
//!
//! All three search filters are optional; with none of them the search
//! returns the most recent BBC News articles NewsAPI has indexed.

use clap::Parser;

/// Search BBC News articles through NewsAPI and print a plain-text digest.
///
/// # Examples
///
/// ```sh
/// # Latest articles
/// bbc_news_search
///
/// # Keyword within a date range
/// bbc_news_search -k football -f 2025-05-01 -t 2025-05-06
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Keyword or phrase to search for
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Oldest publish date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub from_date: Option<String>,

    /// Newest publish date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub to_date: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
