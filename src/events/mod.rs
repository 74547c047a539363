//! # Historical events
//!
//! Data model for the Wikipedia "On this day" feed plus the two-stage
//! filter pipeline applied before events are handed to the UI:
//!
//! - [`year::filter_by_year`] keeps events inside a [`YearBucket`].
//! - [`category::filter_by_category`] keeps events whose text contains a
//!   keyword of the selected [`Category`].
//!
//! Filters borrow their input and return the kept events in original order.

pub mod category;
pub mod year;

pub use category::{filter_by_category, filter_by_category_with, Category, CategoryKeywords};
pub use year::{filter_by_year, YearBucket};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `year` as delivered by the feed. Usually an integer, occasionally a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventYear {
    Int(i64),
    Float(f64),
    Text(String),
    /// Bools, objects, arrays: kept for display, never comparable.
    Other(Value),
}

impl EventYear {
    /// Integer value used for bucket comparison, or `None` when the value
    /// has no leading integer (treated as a failed comparison).
    pub fn parsed(&self) -> Option<i64> {
        match self {
            EventYear::Int(v) => Some(*v),
            EventYear::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            EventYear::Float(_) => None,
            EventYear::Text(s) => parse_leading_int(s),
            EventYear::Other(_) => None,
        }
    }

    /// Value as shown next to the event text.
    pub fn display(&self) -> String {
        match self {
            EventYear::Int(v) => v.to_string(),
            EventYear::Float(f) => f.to_string(),
            EventYear::Text(s) => s.clone(),
            EventYear::Other(v) => v.to_string(),
        }
    }
}

/// Leading signed integer after optional whitespace: `" -44 BC"` -> -44.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // digits only, so a parse failure is overflow: saturate
    let v = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * v)
}

/// `null` decodes to the type's default instead of failing the record.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesktopUrls {
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<DesktopUrls>,
}

/// Page record attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

impl Page {
    pub fn desktop_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()?
            .desktop
            .as_ref()?
            .page
            .as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default)]
    pub year: Option<EventYear>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<Page>,
}

impl HistoricalEvent {
    pub fn parsed_year(&self) -> Option<i64> {
        self.year.as_ref().and_then(EventYear::parsed)
    }

    /// Article link of the first page, if that page carries one.
    pub fn article_url(&self) -> Option<&str> {
        self.pages.first().and_then(Page::desktop_url)
    }
}

/// Active selectors, passed explicitly into the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub bucket: YearBucket,
    pub category: Category,
}

impl EventFilter {
    /// Lossy construction from raw query-string selectors.
    pub fn from_selectors(bucket: Option<&str>, category: Option<&str>) -> Self {
        Self {
            bucket: YearBucket::from(bucket.unwrap_or_default()),
            category: Category::from(category.unwrap_or_default()),
        }
    }

    /// Year bucket first, then category on the reduced sequence.
    pub fn apply<'a, I>(&self, events: I, keywords: &CategoryKeywords) -> Vec<&'a HistoricalEvent>
    where
        I: IntoIterator<Item = &'a HistoricalEvent>,
    {
        let by_year = filter_by_year(events, self.bucket);
        filter_by_category_with(by_year, self.category, keywords)
    }
}
