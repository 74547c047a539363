// src/config/categories.rs
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::resolve_config_path;

use crate::events::{Category, CategoryKeywords};

pub const ENV_PATH: &str = "CATEGORY_KEYWORDS_PATH";

/// Load keyword overrides from an explicit path. Supports TOML or JSON.
/// Categories missing from the file keep their built-in lists.
pub fn load_keywords_from(path: &Path) -> Result<CategoryKeywords> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading category keywords from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let raw = parse_raw(&content, ext.as_str())
        .with_context(|| format!("parsing category keywords in {}", path.display()))?;
    apply_overrides(CategoryKeywords::default(), raw)
}

pub const DEFAULT_CANDIDATES: [&str; 2] = ["config/categories.toml", "config/categories.json"];

/// `$CATEGORY_KEYWORDS_PATH`, then [`DEFAULT_CANDIDATES`], then the built-in table.
pub fn load_keywords_default() -> Result<CategoryKeywords> {
    match resolve_config_path(|k| std::env::var(k).ok(), ENV_PATH, &DEFAULT_CANDIDATES)? {
        Some(path) => {
            tracing::info!(target: "config", path = %path.display(), "category keywords loaded from file");
            load_keywords_from(&path)
        }
        None => Ok(CategoryKeywords::default()),
    }
}

type RawLists = HashMap<String, Vec<String>>;

fn parse_raw(s: &str, hint_ext: &str) -> Result<RawLists> {
    match hint_ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        _ => parse_toml(s).or_else(|_| parse_json(s)),
    }
}

fn parse_toml(s: &str) -> Result<RawLists> {
    #[derive(serde::Deserialize)]
    struct TomlCats {
        categories: RawLists,
    }
    let v: TomlCats = toml::from_str(s)?;
    Ok(v.categories)
}

fn parse_json(s: &str) -> Result<RawLists> {
    Ok(serde_json::from_str(s)?)
}

fn apply_overrides(mut kw: CategoryKeywords, raw: RawLists) -> Result<CategoryKeywords> {
    for (name, list) in raw {
        match Category::parse_name(&name) {
            Some(Category::All) => {}
            Some(c) => kw.set(c, list),
            None => bail!("unknown category '{name}'"),
        }
    }
    Ok(kw)
}
