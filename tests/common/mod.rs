// tests/common/mod.rs
//
// In-process fakes for every upstream trait plus small request helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt as _;

use onthisday_explorer::events::{CategoryKeywords, HistoricalEvent};
use onthisday_explorer::news::{NewsEnvelope, NewsGateway, NewsSource};
use onthisday_explorer::upstream::{
    Country, CountryDirectory, MonthDay, OnThisDayFeed, SearchHit, TopicSearch,
};
use onthisday_explorer::{router, AppState};

pub const BODY_LIMIT: usize = 1024 * 1024;

pub enum NewsBehaviour {
    Envelope(Value),
    Fail(&'static str),
}

pub struct FakeNews {
    pub behaviour: NewsBehaviour,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<(String, String)>>,
}

impl FakeNews {
    pub fn new(behaviour: NewsBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NewsSource for FakeNews {
    async fn search(&self, query: &str, api_key: &str) -> Result<NewsEnvelope> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((query.to_string(), api_key.to_string()));
        match &self.behaviour {
            NewsBehaviour::Envelope(v) => Ok(serde_json::from_value(v.clone())?),
            NewsBehaviour::Fail(detail) => Err(anyhow!("{detail}")),
        }
    }

    fn name(&self) -> &'static str {
        "fake-news"
    }
}

pub struct FakeFeed {
    pub events: Option<Vec<HistoricalEvent>>,
    pub last: Mutex<Option<MonthDay>>,
}

impl FakeFeed {
    pub fn with(events: Value) -> Arc<Self> {
        Arc::new(Self {
            events: Some(serde_json::from_value(events).expect("fixture events")),
            last: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            events: None,
            last: Mutex::new(None),
        })
    }
}

#[async_trait::async_trait]
impl OnThisDayFeed for FakeFeed {
    async fn selected(&self, date: MonthDay) -> Result<Vec<HistoricalEvent>> {
        *self.last.lock().unwrap() = Some(date);
        self.events
            .clone()
            .ok_or_else(|| anyhow!("feed down: connection refused"))
    }
}

pub struct FakeSearch(pub Vec<SearchHit>);

#[async_trait::async_trait]
impl TopicSearch for FakeSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        Ok(self.0.clone())
    }
}

pub struct FakeCountries(pub Vec<Country>);

#[async_trait::async_trait]
impl CountryDirectory for FakeCountries {
    async fn countries(&self) -> Result<Vec<Country>> {
        Ok(self.0.clone())
    }
}

pub fn sample_events() -> Value {
    json!([
        { "year": 2004, "text": "An earthquake and tsunami strike the Indian Ocean",
          "pages": [{ "content_urls": { "desktop": { "page": "https://en.wikipedia.org/wiki/2004_tsunami" } } }] },
        { "year": 1969, "text": "Apollo 11 lands on the Moon after its space launch",
          "pages": [] },
        { "year": 1944, "text": "A major Battle occurred in Normandy" },
        { "year": "1815", "text": "The Battle of Waterloo ends" },
        { "year": "unknown", "text": "A war of uncertain date begins" },
        { "year": 1452, "text": "Leonardo da Vinci is born" }
    ])
}

pub struct Harness {
    pub state: AppState,
    pub news: Arc<FakeNews>,
    pub feed: Arc<FakeFeed>,
}

impl Harness {
    pub fn new(news: Arc<FakeNews>, feed: Arc<FakeFeed>, api_key: Option<&str>) -> Self {
        let state = AppState {
            news: NewsGateway::new(news.clone(), api_key.map(str::to_string)),
            feed: feed.clone(),
            search: Arc::new(FakeSearch(vec![SearchHit {
                title: "Moon landing".into(),
                snippet: r#"First <span class="searchmatch">Moon</span> landing &amp; return"#
                    .into(),
            }])),
            countries: Arc::new(FakeCountries(vec![
                Country { name: "Albania".into(), code: "AL".into() },
                Country { name: "Japan".into(), code: "JP".into() },
            ])),
            keywords: Arc::new(CategoryKeywords::default()),
        };
        Self { state, news, feed }
    }

    pub fn default_ok() -> Self {
        Self::new(
            FakeNews::new(NewsBehaviour::Envelope(json!({ "status": "ok", "articles": [] }))),
            FakeFeed::with(sample_events()),
            Some("test-key"),
        )
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, v)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET")
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build POST")
}
