use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use metrics::counter;
use rand::Rng;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::events::{CategoryKeywords, EventFilter, HistoricalEvent};
use crate::news::{NewsApiClient, NewsGateway, NewsOutcome};
use crate::text::{clean_snippet, wiki_article_url};
use crate::upstream::{
    Country, CountryDirectory, MonthDay, OnThisDayFeed, RestCountriesClient, TopicSearch,
    WikiFeedClient, WikiSearchClient,
};

pub const MSG_MISSING_DATE: &str = "Please select both a Month and a Day.";
pub const MSG_BAD_DATE: &str = "Month must be 01-12 and day 01-31.";
pub const MSG_NO_TOPIC: &str = "No search query provided.";

#[derive(Clone)]
pub struct AppState {
    pub news: NewsGateway,
    pub feed: Arc<dyn OnThisDayFeed>,
    pub search: Arc<dyn TopicSearch>,
    pub countries: Arc<dyn CountryDirectory>,
    pub keywords: Arc<CategoryKeywords>,
}

impl AppState {
    /// Wire the real HTTP clients from configuration.
    pub fn from_config(cfg: &AppConfig, keywords: CategoryKeywords) -> Result<Self> {
        let up = &cfg.upstream;
        let news_client = NewsApiClient::from_config(&cfg.news)?;
        Ok(Self {
            news: NewsGateway::new(Arc::new(news_client), cfg.news.api_key.clone()),
            feed: Arc::new(WikiFeedClient::new(&up.feed_base_url, up.timeout)?),
            search: Arc::new(WikiSearchClient::new(&up.search_url, up.timeout)?),
            countries: Arc::new(RestCountriesClient::new(&up.countries_url, up.timeout)?),
            keywords: Arc::new(keywords),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/get-news", post(get_news))
        .route("/api/events", get(events_for_date))
        .route("/api/events/today", get(events_today))
        .route("/api/events/random", get(events_random))
        .route("/api/search", get(topic_search))
        .route("/api/countries", get(list_countries))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// JSON `{"error": ...}` failures for the non-news endpoints.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    /// Upstream unreachable or undecodable; detail already logged.
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Upstream(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

fn upstream_failure(upstream: &'static str, msg: &'static str, e: anyhow::Error) -> ApiError {
    tracing::error!(target: "upstream", upstream, error = ?e, "upstream request failed");
    counter!("upstream_errors_total", "upstream" => upstream).increment(1);
    ApiError::Upstream(msg)
}

// ---- news ----

async fn get_news(State(state): State<AppState>, body: Bytes) -> NewsOutcome {
    let query = NewsGateway::query_from_body(&body);
    state.news.search(query.as_deref()).await
}

// ---- events ----

#[derive(Debug, Default, serde::Deserialize)]
struct SelectorParams {
    bucket: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct EventsParams {
    month: Option<String>,
    day: Option<String>,
    bucket: Option<String>,
    category: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct EventView {
    year: Option<String>,
    text: String,
    url: Option<String>,
}

impl From<&HistoricalEvent> for EventView {
    fn from(ev: &HistoricalEvent) -> Self {
        Self {
            year: ev.year.as_ref().map(|y| y.display()),
            text: ev.text.clone(),
            url: ev.article_url().map(str::to_string),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct EventsResponse {
    month: String,
    day: String,
    bucket: &'static str,
    category: &'static str,
    total: usize,
    shown: usize,
    events: Vec<EventView>,
}

fn parse_date(month: Option<&str>, day: Option<&str>) -> Result<MonthDay, ApiError> {
    fn non_blank(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    let (Some(m), Some(d)) = (non_blank(month), non_blank(day)) else {
        return Err(ApiError::BadRequest(MSG_MISSING_DATE));
    };
    let (Ok(m), Ok(d)) = (m.parse::<u32>(), d.parse::<u32>()) else {
        return Err(ApiError::BadRequest(MSG_BAD_DATE));
    };
    MonthDay::new(m, d).ok_or(ApiError::BadRequest(MSG_BAD_DATE))
}

async fn serve_events(
    state: &AppState,
    date: MonthDay,
    filter: EventFilter,
) -> Result<Json<EventsResponse>, ApiError> {
    let raw = state
        .feed
        .selected(date)
        .await
        .map_err(|e| upstream_failure("wiki_feed", "Error accessing Wikipedia data.", e))?;

    let kept = filter.apply(&raw, &state.keywords);
    let events: Vec<EventView> = kept.into_iter().map(EventView::from).collect();
    counter!("events_served_total").increment(events.len() as u64);

    let (month, day) = date.padded();
    tracing::info!(
        target: "events",
        %month, %day,
        bucket = filter.bucket.as_str(),
        category = filter.category.as_str(),
        total = raw.len(),
        shown = events.len(),
        "events served"
    );

    Ok(Json(EventsResponse {
        month,
        day,
        bucket: filter.bucket.as_str(),
        category: filter.category.as_str(),
        total: raw.len(),
        shown: events.len(),
        events,
    }))
}

async fn events_for_date(
    State(state): State<AppState>,
    Query(p): Query<EventsParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let date = parse_date(p.month.as_deref(), p.day.as_deref())?;
    let filter = EventFilter::from_selectors(p.bucket.as_deref(), p.category.as_deref());
    serve_events(&state, date, filter).await
}

async fn events_today(
    State(state): State<AppState>,
    Query(p): Query<SelectorParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let now = chrono::Utc::now();
    let date = MonthDay {
        month: now.month(),
        day: now.day(),
    };
    let filter = EventFilter::from_selectors(p.bucket.as_deref(), p.category.as_deref());
    serve_events(&state, date, filter).await
}

async fn events_random(
    State(state): State<AppState>,
    Query(p): Query<SelectorParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let date = {
        let mut rng = rand::rng();
        MonthDay {
            month: rng.random_range(1..=12),
            day: rng.random_range(1..=31),
        }
    };
    let filter = EventFilter::from_selectors(p.bucket.as_deref(), p.category.as_deref());
    serve_events(&state, date, filter).await
}

// ---- topic search ----

#[derive(Debug, Default, serde::Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct SearchResult {
    title: String,
    snippet: String,
    url: String,
}

#[derive(Debug, serde::Serialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

async fn topic_search(
    State(state): State<AppState>,
    Query(p): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = p.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::BadRequest(MSG_NO_TOPIC));
    }
    let hits = state
        .search
        .search(q)
        .await
        .map_err(|e| upstream_failure("wiki_search", "Error accessing Wikipedia search.", e))?;

    let results = hits
        .into_iter()
        .map(|h| SearchResult {
            url: wiki_article_url(&h.title),
            snippet: clean_snippet(&h.snippet),
            title: h.title,
        })
        .collect();
    Ok(Json(SearchResponse { results }))
}

// ---- countries ----

async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>, ApiError> {
    state
        .countries
        .countries()
        .await
        .map(Json)
        .map_err(|e| upstream_failure("countries", "Error loading the country list.", e))
}
