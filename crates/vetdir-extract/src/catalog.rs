//! Catalog document parser.
//!
//! The catalog is a Markdown-like listing where each venue spans two lines:
//!
//! ```text
//! - **Clinique du Marais** — 12 Rue du Marais, 75003 Paris — Note: 4.8 (120)
//!   - Maps: https://www.google.com/maps/search/?api=1&query=48.85%2C2.36
//! ```
//!
//! Headers, counts and blank separators are skipped. A missing `Maps:` line
//! degrades to a synthesized search link.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use vetdir_core::VenueRecord;

use crate::maps_url::search_url;
use crate::render::{UNKNOWN_ADDRESS, UNKNOWN_NAME};

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- \*\*(.+?)\*\* — (.+?)(?: — Note: .*?)?$").expect("valid regex")
});
static MAPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Maps: (https?://\S+)").expect("valid regex"));

/// Parse a catalog document into venue records, in document order.
#[must_use]
pub fn parse_catalog(document: &str) -> Vec<VenueRecord> {
    let lines: Vec<&str> = document.lines().collect();

    let records: Vec<VenueRecord> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let caps = ENTRY_RE.captures(line)?;
            let name = non_empty_or(caps.get(1).map_or("", |m| m.as_str()), UNKNOWN_NAME);
            let address = non_empty_or(caps.get(2).map_or("", |m| m.as_str()), UNKNOWN_ADDRESS);

            let maps_url = lines
                .get(idx + 1)
                .and_then(|next| MAPS_RE.captures(next))
                .and_then(|c| c.get(1))
                .map_or_else(|| search_url(&name, &address), |m| m.as_str().to_string());

            Some(VenueRecord::new(name, address, maps_url))
        })
        .collect();

    tracing::debug!(count = records.len(), "parsed catalog document");
    records
}

/// Read and parse a catalog file.
///
/// A missing or unreadable file is an empty catalog, not an error.
#[must_use]
pub fn load_catalog(path: &Path) -> Vec<VenueRecord> {
    match std::fs::read_to_string(path) {
        Ok(document) => parse_catalog(&document),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "catalog unavailable, using empty catalog");
            Vec::new()
        }
    }
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}
