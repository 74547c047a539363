use metrics::counter;
use serde::Serialize;

use super::HistoricalEvent;

/// Coarse year range selector. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum YearBucket {
    #[default]
    #[serde(rename = "all")]
    All,
    /// 2001 and later.
    #[serde(rename = "2000+")]
    Modern,
    /// 1901..=2000
    #[serde(rename = "1900s")]
    TwentiethCentury,
    /// 1801..=1900
    #[serde(rename = "1800s")]
    NineteenthCentury,
    /// 1800 and earlier.
    #[serde(rename = "before-1800")]
    Before1800,
}

impl From<&str> for YearBucket {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            // a raw `+` in a query string decodes to a space, leaving "2000"
            "2000+" | "2000" => YearBucket::Modern,
            "1900s" => YearBucket::TwentiethCentury,
            "1800s" => YearBucket::NineteenthCentury,
            "before-1800" => YearBucket::Before1800,
            _ => YearBucket::All, // unknown selectors pass everything through
        }
    }
}

impl YearBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            YearBucket::All => "all",
            YearBucket::Modern => "2000+",
            YearBucket::TwentiethCentury => "1900s",
            YearBucket::NineteenthCentury => "1800s",
            YearBucket::Before1800 => "before-1800",
        }
    }

    /// `None` means the year did not parse: never inside a bounded bucket.
    pub fn contains(&self, year: Option<i64>) -> bool {
        match (self, year) {
            (YearBucket::All, _) => true,
            (_, None) => false,
            (YearBucket::Modern, Some(y)) => y >= 2001,
            (YearBucket::TwentiethCentury, Some(y)) => (1901..=2000).contains(&y),
            (YearBucket::NineteenthCentury, Some(y)) => (1801..=1900).contains(&y),
            (YearBucket::Before1800, Some(y)) => y <= 1800,
        }
    }
}

/// Keep events whose parsed year falls inside `bucket`, in input order.
///
/// Events with an unparseable year are dropped from every bucket except
/// [`YearBucket::All`]; the number dropped that way is logged.
pub fn filter_by_year<'a, I>(events: I, bucket: YearBucket) -> Vec<&'a HistoricalEvent>
where
    I: IntoIterator<Item = &'a HistoricalEvent>,
{
    if bucket == YearBucket::All {
        return events.into_iter().collect();
    }

    let mut unparsed = 0usize;
    let kept = events
        .into_iter()
        .filter(|ev| {
            let year = ev.parsed_year();
            if year.is_none() {
                unparsed += 1;
            }
            bucket.contains(year)
        })
        .collect();

    if unparsed > 0 {
        tracing::warn!(
            target: "events",
            bucket = bucket.as_str(),
            dropped = unparsed,
            "events without a numeric year excluded from bucket"
        );
        counter!("events_year_unparsed_total").increment(unparsed as u64);
    }
    kept
}
