//! Fallback map-link scraping and the matching link stripper.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;
use vetdir_core::{CityProfile, VenueRecord};

use crate::maps_url::query_param;

// Full-domain and shortened map links. Parentheses are part of a link only
// when balanced inside it, so a link wrapped in `(...)` stops before the
// closing one. A link never ends on sentence punctuation and never swallows
// a bracket or quote.
static MAP_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let plain = r#"[^\s<>()\[\]"]"#;
    let group = format!(r"\({plain}*\)");
    let body = format!("(?:{plain}|{group})*");
    Regex::new(&format!(
        r#"(?i)https?://(?:www\.)?(?:google\.|maps\.)?google\.com/maps(?:{body}(?:[^\s<>()\[\]".,;:!?']|{group}))?|https?://(?:goo\.gl/maps/|maps\.app\.goo\.gl/){body}(?:[^\s<>()\[\]".,;:!?'/]|{group})"#
    ))
    .expect("valid regex")
});
static EMPTY_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("valid regex"));
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

static PARIS: LazyLock<CityProfile> = LazyLock::new(CityProfile::paris);

/// [`scrape_map_links_for`] with the built-in Paris placeholders.
#[must_use]
pub fn scrape_map_links(text: &str) -> Vec<VenueRecord> {
    scrape_map_links_for(text, &PARIS)
}

/// Synthesize one record per map link found in `text`, left to right.
///
/// The link's `q` parameter, when present, is both name and address; the
/// fallback path has no way to tell them apart. Links without it get the
/// profile's placeholders.
#[must_use]
pub fn scrape_map_links_for(text: &str, profile: &CityProfile) -> Vec<VenueRecord> {
    let records: Vec<VenueRecord> = MAP_LINK_RE
        .find_iter(text)
        .map(|m| {
            let maps_url = m.as_str();
            match search_label(maps_url) {
                Some(label) => VenueRecord::new(label.clone(), label, maps_url),
                None => VenueRecord::new(
                    profile.placeholder_name.as_str(),
                    profile.placeholder_address.as_str(),
                    maps_url,
                ),
            }
        })
        .collect();

    tracing::debug!(count = records.len(), "scraped map links from reply text");
    records
}

/// Remove every map link from `text`, then drop the empty `()` and
/// whitespace runs left behind. Idempotent.
#[must_use]
pub fn strip_map_links(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

// Never grows its input, and shrinks it whenever anything changes.
fn strip_once(text: &str) -> String {
    let without_links = MAP_LINK_RE.replace_all(text, "");
    let without_parens = EMPTY_PARENS_RE.replace_all(&without_links, "");
    WHITESPACE_RUN_RE
        .replace_all(&without_parens, " ")
        .trim()
        .to_string()
}

/// Decoded `q` parameter of a map link. Some generators double-encode it,
/// so a second decoding pass is applied when it yields valid UTF-8.
fn search_label(maps_url: &str) -> Option<String> {
    let url = Url::parse(maps_url).ok()?;
    let query = query_param(&url, "q")?;
    let label = percent_decode_str(&query)
        .decode_utf8()
        .map_or_else(|_| query.clone(), std::borrow::Cow::into_owned);
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}
