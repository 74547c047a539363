// src/upstream/countries.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::upstream::{Country, CountryDirectory};

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: RawName,
    #[serde(default)]
    cca2: String,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
}

/// Sort by common name, case-insensitively, ties broken by code.
pub fn sort_countries(list: &mut [Country]) {
    list.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.code.cmp(&b.code))
    });
}

#[derive(Clone)]
pub struct RestCountriesClient {
    url: String,
    client: Client,
}

impl RestCountriesClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building countries http client")?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn countries(&self) -> Result<Vec<Country>> {
        let raw: Vec<RawCountry> = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("countries http get()")?
            .error_for_status()
            .context("countries http status")?
            .json()
            .await
            .context("decoding countries json")?;

        let mut out: Vec<Country> = raw
            .into_iter()
            .map(|c| Country {
                name: c.name.common,
                code: c.cca2,
            })
            .collect();
        sort_countries(&mut out);
        Ok(out)
    }
}
