// src/upstream/mod.rs
//! Read-only public collaborators, each behind a one-method trait so the
//! router can be exercised against fakes.

pub mod countries;
pub mod wikipedia;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::events::HistoricalEvent;

pub use countries::RestCountriesClient;
pub use wikipedia::{WikiFeedClient, WikiSearchClient};

/// Calendar date as requested by the UI. Both parts are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Month 1..=12, day 1..=31. Day is not checked against the month.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { month, day })
    }

    /// Zero-padded `MM` and `DD`.
    pub fn padded(&self) -> (String, String) {
        (format!("{:02}", self.month), format!("{:02}", self.day))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    /// Raw HTML snippet as returned by the search API.
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

#[async_trait::async_trait]
pub trait OnThisDayFeed: Send + Sync {
    async fn selected(&self, date: MonthDay) -> Result<Vec<HistoricalEvent>>;
}

#[async_trait::async_trait]
pub trait TopicSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[async_trait::async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Countries sorted by common name.
    async fn countries(&self) -> Result<Vec<Country>>;
}
