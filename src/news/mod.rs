// src/news/mod.rs
//! News proxy gateway: holds the NewsAPI credential server-side, validates
//! the caller's query, relays it upstream once, and maps every result onto
//! a fixed `{"articles": [...]}` / `{"error": "..."}` shape.

pub mod client;
pub mod types;

use axum::{http::StatusCode, response::IntoResponse, Json};
use metrics::counter;
use serde_json::{json, Value};
use std::sync::Arc;

pub use client::NewsApiClient;
pub use types::{NewsEnvelope, NewsSource};

pub const MSG_MISSING_KEY: &str = "Configuration Error: NEWS_API_KEY is missing.";
pub const MSG_NO_QUERY: &str = "No search query provided.";
pub const MSG_UNREACHABLE: &str = "Failed to connect to NewsAPI.";

/// Terminal outcome of one gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsOutcome {
    Articles(Value),
    BadRequest,
    MissingCredential,
    Upstream(String),
    Unreachable,
}

impl NewsOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            NewsOutcome::Articles(_) => StatusCode::OK,
            NewsOutcome::BadRequest => StatusCode::BAD_REQUEST,
            NewsOutcome::MissingCredential
            | NewsOutcome::Upstream(_)
            | NewsOutcome::Unreachable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            NewsOutcome::Articles(a) => json!({ "articles": a }),
            NewsOutcome::BadRequest => json!({ "error": MSG_NO_QUERY }),
            NewsOutcome::MissingCredential => json!({ "error": MSG_MISSING_KEY }),
            NewsOutcome::Upstream(msg) => json!({ "error": format!("NewsAPI Error: {msg}") }),
            NewsOutcome::Unreachable => json!({ "error": MSG_UNREACHABLE }),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NewsOutcome::Articles(_) => "ok",
            NewsOutcome::BadRequest => "bad_request",
            NewsOutcome::MissingCredential => "config_error",
            NewsOutcome::Upstream(_) => "upstream_error",
            NewsOutcome::Unreachable => "unreachable",
        }
    }
}

impl IntoResponse for NewsOutcome {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[derive(Clone)]
pub struct NewsGateway {
    source: Arc<dyn NewsSource>,
    api_key: Option<String>,
}

impl NewsGateway {
    pub fn new(source: Arc<dyn NewsSource>, api_key: Option<String>) -> Self {
        Self { source, api_key }
    }

    /// Pull `query` out of a raw request body. Anything other than a JSON
    /// object with a string `query` yields `None`.
    pub fn query_from_body(body: &[u8]) -> Option<String> {
        let v: Value = serde_json::from_slice(body).ok()?;
        v.get("query")?.as_str().map(str::to_string)
    }

    pub async fn search(&self, query: Option<&str>) -> NewsOutcome {
        let outcome = self.search_inner(query).await;
        counter!("news_requests_total", "outcome" => outcome.label()).increment(1);
        outcome
    }

    async fn search_inner(&self, query: Option<&str>) -> NewsOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!(target: "news", "news credential not configured");
            return NewsOutcome::MissingCredential;
        };

        // blank check only; the caller's text goes upstream as typed
        let query = match query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return NewsOutcome::BadRequest,
        };

        let qid = anon_hash(query);
        match self.source.search(query, api_key).await {
            Ok(env) if env.is_error() => {
                let msg = env.message.unwrap_or_default();
                tracing::warn!(target: "news", %qid, provider = self.source.name(), message = %msg, "upstream error envelope");
                NewsOutcome::Upstream(msg)
            }
            Ok(env) => {
                let articles = env.articles.unwrap_or_else(|| Value::Array(Vec::new()));
                let n = articles.as_array().map_or(0, Vec::len);
                tracing::info!(target: "news", %qid, articles = n, "news search ok");
                NewsOutcome::Articles(articles)
            }
            Err(e) => {
                tracing::error!(target: "news", %qid, provider = self.source.name(), error = ?e, "news upstream unreachable");
                counter!("upstream_errors_total", "upstream" => "news").increment(1);
                NewsOutcome::Unreachable
            }
        }
    }
}

/// Short SHA-256 prefix so queries can be correlated in logs without
/// recording them.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
