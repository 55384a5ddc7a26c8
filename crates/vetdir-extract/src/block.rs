//! Structured-block extraction from assistant replies.
//!
//! A reply may embed one `<VET_CARDS>…</VET_CARDS>` (or `[VET_CARDS]…[/VET_CARDS]`)
//! block holding a JSON-ish array of venue cards. The block is always removed
//! from the displayed text; its payload is read by an ordered list of parsers
//! and the first one that yields an array wins.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value;
use vetdir_core::{ParsedReply, VenueRecord};

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:<|\[)VET_CARDS(?:\]|>)\s*(.*?)\s*(?:</VET_CARDS>|\[/VET_CARDS\])")
        .expect("valid regex")
});
static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[a-zA-Z]*\r?\n?").expect("valid regex"));
static FENCE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*$").expect("valid regex"));
static QUOTED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([{,]\s*)'([^'"]*)'(\s*:)"#).expect("valid regex"));
static QUOTED_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(:\s*)'([^']*)'").expect("valid regex"));

// Lower-cased. Searched in an ASCII-lower-cased copy, which keeps byte offsets.
const OPEN_TAGS: [&str; 2] = ["<vet_cards>", "[vet_cards]"];
const CLOSE_TAGS: [&str; 2] = ["</vet_cards>", "[/vet_cards]"];

type PayloadParser = fn(&str) -> Option<Vec<Value>>;

const PAYLOAD_PARSERS: [(&str, PayloadParser); 2] = [
    ("strict", parse_strict),
    ("requoted", parse_requoted),
];

/// Where the block sits in the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockSpan {
    /// Tags included; this is what gets cut out of the reply.
    outer: Range<usize>,
    payload: Range<usize>,
}

/// Card shape accepted from the payload. Anything else is dropped.
#[derive(Debug, Deserialize)]
struct CardPayload {
    name: String,
    address: String,
    #[serde(rename = "mapsUrl", alias = "maps_url")]
    maps_url: String,
    #[serde(default, rename = "bookingUrl", alias = "booking_url")]
    booking_url: Option<Value>,
}

/// Split a reply into its prose and the venue cards of its structured block.
///
/// Without a block the reply is returned unchanged with no cards. A block
/// that cannot be parsed is still removed from the text.
#[must_use]
pub fn extract_structured_block(reply: &str) -> ParsedReply {
    let Some(span) = locate_block(reply) else {
        return ParsedReply {
            text: reply.to_string(),
            cards: Vec::new(),
        };
    };

    let payload = normalize_payload(&reply[span.payload.clone()]);
    let cards = parse_cards(&payload);

    let text = format!("{}{}", &reply[..span.outer.start], &reply[span.outer.end..])
        .trim()
        .to_string();

    ParsedReply { text, cards }
}

fn locate_block(reply: &str) -> Option<BlockSpan> {
    if let Some(caps) = BLOCK_RE.captures(reply) {
        let outer = caps.get(0)?.range();
        let payload = caps.get(1).map_or(outer.start..outer.start, |m| m.range());
        return Some(BlockSpan { outer, payload });
    }

    // Tags the combined pattern could not pair up. Take the first opening
    // and first closing tag independently.
    let lower = reply.to_ascii_lowercase();
    let (open_start, open_end) = OPEN_TAGS
        .iter()
        .find_map(|tag| lower.find(tag).map(|idx| (idx, idx + tag.len())))?;
    let (close_start, close_end) = CLOSE_TAGS
        .iter()
        .find_map(|tag| lower.find(tag).map(|idx| (idx, idx + tag.len())))?;

    (close_start > open_end).then(|| BlockSpan {
        outer: open_start..close_end,
        payload: open_end..close_start,
    })
}

/// Strip a surrounding code fence and straighten smart quotes.
fn normalize_payload(raw: &str) -> String {
    let mut payload = raw.trim().to_string();
    if payload.starts_with("```") {
        payload = FENCE_OPEN_RE.replace(&payload, "").into_owned();
        payload = FENCE_CLOSE_RE.replace(&payload, "").into_owned();
    }
    payload
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

fn parse_cards(payload: &str) -> Vec<VenueRecord> {
    let Some((strategy, entries)) = PAYLOAD_PARSERS
        .iter()
        .find_map(|(name, parser)| parser(payload).map(|entries| (*name, entries)))
    else {
        tracing::warn!(
            payload_len = payload.len(),
            "structured block found but no parser could read it"
        );
        return Vec::new();
    };

    let total = entries.len();
    let cards: Vec<VenueRecord> = entries.into_iter().filter_map(card_from_value).collect();
    tracing::debug!(
        strategy,
        total,
        accepted = cards.len(),
        "parsed structured block"
    );
    cards
}

fn card_from_value(value: Value) -> Option<VenueRecord> {
    let card: CardPayload = serde_json::from_value(value).ok()?;
    let field = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);

    let mut record = VenueRecord::new(
        field(&card.name)?,
        field(&card.address)?,
        field(&card.maps_url)?,
    );
    record.booking_url = card
        .booking_url
        .as_ref()
        .and_then(Value::as_str)
        .and_then(field);
    Some(record)
}

fn parse_strict(payload: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(payload).ok()? {
        Value::Array(entries) => Some(entries),
        _ => None,
    }
}

fn parse_requoted(payload: &str) -> Option<Vec<Value>> {
    parse_strict(&requote(payload))
}

/// Rewrite single-quoted keys and values as double-quoted JSON strings.
fn requote(payload: &str) -> String {
    let escape = |s: &str| s.replace('"', "\\\"");
    let keys = QUOTED_KEY_RE.replace_all(payload, |caps: &Captures| {
        format!("{}\"{}\"{}", &caps[1], escape(&caps[2]), &caps[3])
    });
    QUOTED_VALUE_RE
        .replace_all(&keys, |caps: &Captures| {
            format!("{}\"{}\"", &caps[1], escape(&caps[2]))
        })
        .into_owned()
}

#[cfg(test)]
#[path = "block_test.rs"]
mod tests;
