//! NewsAPI article search.
//!
//! The fetcher is split in two so the outcome mapping can be tested without
//! the network:
//! - [`Transport`]: issues one GET and hands back status + body
//! - [`fetch_articles`]: builds the query and interprets the response
//!
//! [`HttpTransport`] is the `reqwest` implementation used at runtime.
//!
//! # Outcomes
//!
//! | Outcome | Result |
//! |---------|--------|
//! | timeout | [`AppError::Timeout`] |
//! | any other transport failure | [`AppError::Network`] |
//! | HTTP status other than 200 | [`ApiError::Status`] with the raw body |
//! | 200, body not JSON | [`ApiError::Decode`] |
//! | 200, `status != "ok"` | [`ApiError::Payload`] with the raw body |
//! | 200, `status == "ok"` | the `articles` list, possibly empty |

use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::filter::{DATE_FORMAT, RequestFilter};
use crate::models::{Article, SearchResponse};
use crate::utils::truncate_for_log;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};
use url::Url;

/// Fixed source restriction sent with every search.
pub const SOURCES: &str = "bbc-news";

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// A single HTTP GET.
///
/// Implementations must report a timeout as [`AppError::Timeout`] and every
/// other transport failure as [`AppError::Network`].
pub trait Transport {
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<RawResponse, AppError>;
}

impl<T: Transport> Transport for &T {
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<RawResponse, AppError> {
        (**self).get(url, query).await
    }
}

/// [`Transport`] backed by a `reqwest` client with a total-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(AppError::network)?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::network(e)
    }
}

impl Transport for HttpTransport {
    #[instrument(level = "debug", skip_all, fields(host = url.host_str().unwrap_or("")))]
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<RawResponse, AppError> {
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

/// Query parameters for one search, in wire order.
///
/// Absent filters are omitted entirely rather than sent empty.
pub fn build_query(api_key: &str, filter: &RequestFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("apiKey", api_key.to_string()),
        ("sources", SOURCES.to_string()),
    ];
    if let Some(keyword) = &filter.keyword {
        query.push(("q", keyword.clone()));
    }
    if let Some(from) = filter.from_date {
        query.push(("from", from.format(DATE_FORMAT).to_string()));
    }
    if let Some(to) = filter.to_date {
        query.push(("to", to.format(DATE_FORMAT).to_string()));
    }
    query
}

/// Interpret a completed exchange.
pub fn parse_response(raw: RawResponse) -> Result<Vec<Article>, ApiError> {
    if raw.status != 200 {
        return Err(ApiError::Status {
            status: raw.status,
            body: raw.body,
        });
    }

    let response: SearchResponse = serde_json::from_str(&raw.body)?;
    if !response.is_ok() {
        return Err(ApiError::Payload { payload: raw.body });
    }

    debug!(total_results = ?response.total_results, "Decoded search response");
    Ok(response.articles)
}

/// Run one search against NewsAPI.
///
/// Exactly one request is issued; nothing is retried.
#[instrument(level = "info", skip_all, fields(endpoint = %config.endpoint()))]
pub async fn fetch_articles<T: Transport>(
    transport: &T,
    config: &Config,
    filter: &RequestFilter,
) -> Result<Vec<Article>, AppError> {
    let query = build_query(config.api_key(), filter);
    let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();

    let t0 = Instant::now();
    let raw = transport.get(config.endpoint(), &pairs).await?;
    let dt = t0.elapsed();

    if raw.status != 200 {
        debug!(
            status = raw.status,
            elapsed_ms = dt.as_millis() as u64,
            body_preview = %truncate_for_log(&raw.body, 300),
            "Search request rejected"
        );
    }

    let articles = parse_response(raw)?;
    info!(
        count = articles.len(),
        elapsed_ms = dt.as_millis() as u64,
        "Fetched articles"
    );
    Ok(articles)
}
