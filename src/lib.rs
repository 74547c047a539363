// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod events;
pub mod metrics;
pub mod news;
pub mod text;
pub mod upstream;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::events::{
    filter_by_category, filter_by_year, Category, EventFilter, HistoricalEvent, YearBucket,
};
pub use crate::news::{NewsGateway, NewsOutcome};

use anyhow::Result;
use axum::Router;

/// Full application router from the process environment: real upstream
/// clients, keyword table from disk (or built-in), Prometheus `/metrics`.
pub fn app() -> Result<Router> {
    let cfg = config::AppConfig::from_env();
    let keywords = config::categories::load_keywords_default()?;
    if cfg.news.api_key.is_none() {
        tracing::warn!("NEWS_API_KEY not set; /api/get-news will answer 500");
    }
    let state = AppState::from_config(&cfg, keywords)?;
    let metrics = metrics::Metrics::init()?;
    Ok(router(state).merge(metrics.router()))
}
