// src/upstream/wikipedia.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::events::HistoricalEvent;
use crate::upstream::{MonthDay, OnThisDayFeed, SearchHit, TopicSearch};

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("onthisday-explorer/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("building wikipedia http client")
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    selected: Vec<HistoricalEvent>,
}

/// `GET {base}/{MM}/{DD}` on the "On this day" selected feed.
#[derive(Clone)]
pub struct WikiFeedClient {
    base_url: String,
    client: Client,
}

impl WikiFeedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl OnThisDayFeed for WikiFeedClient {
    async fn selected(&self, date: MonthDay) -> Result<Vec<HistoricalEvent>> {
        let (mm, dd) = date.padded();
        let url = format!("{}/{mm}/{dd}", self.base_url);
        let rsp = self
            .client
            .get(&url)
            .send()
            .await
            .context("wiki feed http get()")?
            .error_for_status()
            .context("wiki feed http status")?;
        let feed: FeedResponse = rsp.json().await.context("decoding wiki feed json")?;
        Ok(feed.selected)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

/// MediaWiki `list=search` query.
#[derive(Clone)]
pub struct WikiSearchClient {
    url: String,
    client: Client,
}

impl WikiSearchClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl TopicSearch for WikiSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let rsp = self
            .client
            .get(&self.url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("srsearch", query),
            ])
            .send()
            .await
            .context("wiki search http get()")?
            .error_for_status()
            .context("wiki search http status")?;
        let body: SearchResponse = rsp.json().await.context("decoding wiki search json")?;
        Ok(body.query.map(|q| q.search).unwrap_or_default())
    }
}
