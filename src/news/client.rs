// src/news/client.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::NewsConfig;
use crate::news::types::{NewsEnvelope, NewsSource};

pub const LANGUAGE: &str = "en";
pub const PAGE_SIZE: u32 = 5;
pub const SORT_BY: &str = "publishedAt";

/// NewsAPI `/v2/everything` client. Single attempt, bounded timeout.
#[derive(Clone)]
pub struct NewsApiClient {
    endpoint: String,
    client: Client,
    timeout: Duration,
}

impl NewsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("onthisday-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building news http client")?;
        Ok(Self {
            endpoint: format!("{}/v2/everything", base_url.trim_end_matches('/')),
            client,
            timeout,
        })
    }

    pub fn from_config(cfg: &NewsConfig) -> Result<Self> {
        Self::new(&cfg.base_url, cfg.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &str, api_key: &str) -> Result<NewsEnvelope> {
        let page_size = PAGE_SIZE.to_string();
        let rsp = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .query(&[
                ("q", query),
                ("language", LANGUAGE),
                ("pageSize", page_size.as_str()),
                ("sortBy", SORT_BY),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url) // url carries the api key
            .context("news http get()")?;

        // NewsAPI returns its error envelope on 4xx bodies, so decode regardless of status.
        let status = rsp.status();
        let envelope = rsp
            .json::<NewsEnvelope>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("decoding news response (http {status})"))?;
        Ok(envelope)
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}
