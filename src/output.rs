//! Plain-text digest of search results.
//!
//! Articles are rendered in the order the API returned them, each as a block
//! of four labelled lines between separator rules:
//!
//! ```text
//! --------------------------------------------------------
//! Title: ...
//! Published At: ...
//! Description: ...
//! URL: ...
//! --------------------------------------------------------
//!
//! ```

use crate::models::Article;
use std::fmt::Write;

pub const SEPARATOR: &str = "--------------------------------------------------------";

pub const NO_RESULTS: &str = "No articles found for the given filters.";

/// Shown in place of a field the API left out.
pub const MISSING: &str = "None";

/// Render the digest for `articles` as a single string.
pub fn render_summary(articles: &[Article]) -> String {
    if articles.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let mut out = String::new();
    for article in articles {
        let field = |v: &Option<String>| v.as_deref().unwrap_or(MISSING).to_string();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{SEPARATOR}");
        let _ = writeln!(out, "Title: {}", field(&article.title));
        let _ = writeln!(out, "Published At: {}", field(&article.published_at));
        let _ = writeln!(out, "Description: {}", field(&article.description));
        let _ = writeln!(out, "URL: {}", field(&article.url));
        let _ = writeln!(out, "{SEPARATOR}\n");
    }
    out
}

/// Print the digest to standard output.
pub fn print_summary(articles: &[Article]) {
    print!("{}", render_summary(articles));
}
