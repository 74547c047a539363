// src/text.rs
use once_cell::sync::OnceCell;
use regex::Regex;

/// Clean a Wikipedia search snippet for plain-text display: strip the
/// `<span class="searchmatch">` markup, decode entities, collapse whitespace.
pub fn clean_snippet(s: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    static RE_WS: OnceCell<Regex> = OnceCell::new();

    // Tags go first so encoded brackets survive as literal text.
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z][^>]*>").expect("tag regex"));
    let stripped = re_tags.replace_all(s, "");
    let decoded = html_escape::decode_html_entities(&stripped);

    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("ws regex"));
    re_ws.replace_all(&decoded, " ").trim().to_string()
}

/// `https://en.wikipedia.org/wiki/Title_With_Underscores`
pub fn wiki_article_url(title: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        title.trim().replace(' ', "_")
    )
}
