use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::HistoricalEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Science,
    Wars,
    Art,
    Politics,
    Disaster,
    Sports,
    Economy,
    Births,
    #[default]
    All,
}

impl Category {
    /// Every category that carries a keyword list.
    pub const KEYWORDED: [Category; 8] = [
        Category::Science,
        Category::Wars,
        Category::Art,
        Category::Politics,
        Category::Disaster,
        Category::Sports,
        Category::Economy,
        Category::Births,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Science => "science",
            Category::Wars => "wars",
            Category::Art => "art",
            Category::Politics => "politics",
            Category::Disaster => "disaster",
            Category::Sports => "sports",
            Category::Economy => "economy",
            Category::Births => "births",
            Category::All => "all",
        }
    }

    /// Strict lookup, used when reading keyword files.
    pub fn parse_name(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        std::iter::once(Category::All)
            .chain(Category::KEYWORDED)
            .find(|c| c.as_str() == s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::parse_name(s).unwrap_or(Category::All)
    }
}

const SCIENCE: &[&str] = &[
    "scien", "discover", "invent", "space", "nasa", "satellite", "telescope", "physic",
    "chemis", "vaccine", "medic", "experiment", "patent", "computer",
];
const WARS: &[&str] = &[
    "war", "battle", "army", "invasion", "invade", "siege", "troops", "military", "treaty",
    "bomb", "surrender", "rebellion", "revolt",
];
const ART: &[&str] = &[
    "art", "paint", "music", "album", "film", "novel", "poet", "theatre", "theater", "opera",
    "sculpt", "museum", "premiere",
];
const POLITICS: &[&str] = &[
    "election", "elected", "president", "parliament", "government", "minister", "independence",
    "constitution", "congress", "referendum", "crowned", "assassinat",
];
const DISASTER: &[&str] = &[
    "earthquake", "flood", "fire", "hurricane", "typhoon", "tsunami", "eruption", "explosion",
    "crash", "disaster", "famine", "epidemic", "pandemic", "sank", "derail",
];
const SPORTS: &[&str] = &[
    "olympic", "world cup", "championship", "football", "cricket", "tennis", "tournament",
    "baseball", "basketball", "marathon", "grand prix", "medal",
];
const ECONOMY: &[&str] = &[
    "bank", "stock", "econom", "trade", "currency", "company", "inflation", "recession",
    "depression", "dollar", "tariff", "founded",
];
const BIRTHS: &[&str] = &["born", "birth"];

fn default_list(c: Category) -> &'static [&'static str] {
    match c {
        Category::Science => SCIENCE,
        Category::Wars => WARS,
        Category::Art => ART,
        Category::Politics => POLITICS,
        Category::Disaster => DISASTER,
        Category::Sports => SPORTS,
        Category::Economy => ECONOMY,
        Category::Births => BIRTHS,
        Category::All => &[],
    }
}

static DEFAULT_KEYWORDS: Lazy<CategoryKeywords> = Lazy::new(CategoryKeywords::default);

/// Lower-case keyword lists per category. `All` never has an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKeywords {
    lists: HashMap<Category, Vec<String>>,
}

impl Default for CategoryKeywords {
    fn default() -> Self {
        let lists = Category::KEYWORDED
            .iter()
            .map(|c| {
                let list: Vec<String> = default_list(*c).iter().map(|k| k.to_string()).collect();
                (*c, list)
            })
            .collect();
        Self { lists }
    }
}

impl CategoryKeywords {
    /// Built-in table shared by [`filter_by_category`].
    pub fn builtin() -> &'static CategoryKeywords {
        &DEFAULT_KEYWORDS
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace one category's list. Entries are trimmed, lower-cased and
    /// de-duplicated (first occurrence wins); blanks are dropped.
    /// Setting `All` is a no-op.
    pub fn set(&mut self, category: Category, keywords: Vec<String>) {
        if category == Category::All {
            return;
        }
        let mut clean: Vec<String> = Vec::with_capacity(keywords.len());
        for k in keywords {
            let k = k.trim().to_lowercase();
            if !k.is_empty() && !clean.contains(&k) {
                clean.push(k);
            }
        }
        self.lists.insert(category, clean);
    }

    /// Plain substring match against the lower-cased text; no word boundaries.
    pub fn matches(&self, category: Category, text: &str) -> bool {
        let kws = self.keywords(category);
        if kws.is_empty() {
            return true;
        }
        let lower = text.to_lowercase();
        kws.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Keep events matching `category` using the built-in keyword table.
pub fn filter_by_category<'a, I>(events: I, category: Category) -> Vec<&'a HistoricalEvent>
where
    I: IntoIterator<Item = &'a HistoricalEvent>,
{
    filter_by_category_with(events, category, CategoryKeywords::builtin())
}

pub fn filter_by_category_with<'a, I>(
    events: I,
    category: Category,
    keywords: &CategoryKeywords,
) -> Vec<&'a HistoricalEvent>
where
    I: IntoIterator<Item = &'a HistoricalEvent>,
{
    if keywords.keywords(category).is_empty() {
        return events.into_iter().collect();
    }
    events
        .into_iter()
        .filter(|ev| keywords.matches(category, &ev.text))
        .collect()
}
