// src/news/types.rs
use anyhow::Result;
use serde_json::Value;

/// Upstream envelope. `status == "error"` marks an application-level failure
/// (bad key, rate limit); `articles` is kept as raw JSON for pass-through.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Option<Value>,
}

impl NewsEnvelope {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

/// One outbound search per call; transport and decode failures are `Err`.
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str, api_key: &str) -> Result<NewsEnvelope>;
    fn name(&self) -> &'static str;
}
