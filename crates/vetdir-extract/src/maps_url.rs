//! Map-service URL construction and the embed-URL normalizer.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Same set `encodeURIComponent` escapes: everything but alphanumerics and
/// `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SEARCH_BASE: &str = "https://www.google.com/maps/search/";

pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Free-text search link for a venue whose source carried no map link.
#[must_use]
pub fn search_url(name: &str, address: &str) -> String {
    format!("{SEARCH_BASE}{}", encode_component(&format!("{name} {address}")))
}

/// Search link pinned to coordinates.
#[must_use]
pub fn coordinates_url(lat: f64, lng: f64) -> String {
    format!(
        "{SEARCH_BASE}?api=1&query={}",
        encode_component(&format!("{lat},{lng}"))
    )
}

/// Convert a map link into a form suitable for an inline frame.
///
/// A `q` query parameter becomes a canonical `maps?q=..&output=embed` link.
/// Otherwise `output=embed` is appended unless an `output` parameter already
/// exists. Unparseable input is returned unchanged.
#[must_use]
pub fn to_embed_url(maps_url: &str) -> String {
    let Ok(mut url) = Url::parse(maps_url) else {
        return maps_url.to_string();
    };

    if let Some(query) = query_param(&url, "q").filter(|q| !q.is_empty()) {
        return format!(
            "https://www.google.com/maps?q={}&output=embed",
            encode_component(&query)
        );
    }

    if query_param(&url, "output").is_none() {
        url.query_pairs_mut().append_pair("output", "embed");
    }
    url.to_string()
}

/// First value of `key` in the query string, percent-decoded.
pub(crate) fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_like_uri_component() {
        assert_eq!(
            search_url("Clinique X", "1 Rue Y, 75011 Paris"),
            "https://www.google.com/maps/search/Clinique%20X%201%20Rue%20Y%2C%2075011%20Paris"
        );
    }

    #[test]
    fn search_url_keeps_unreserved_marks_and_encodes_utf8() {
        assert_eq!(
            search_url("Véto (Opéra)", "l'Opéra"),
            "https://www.google.com/maps/search/V%C3%A9to%20(Op%C3%A9ra)%20l'Op%C3%A9ra"
        );
    }

    #[test]
    fn coordinates_url_encodes_comma() {
        assert_eq!(
            coordinates_url(48.8566, 2.3522),
            "https://www.google.com/maps/search/?api=1&query=48.8566%2C2.3522"
        );
    }

    #[test]
    fn embed_from_q_param_is_canonical() {
        assert_eq!(
            to_embed_url("https://maps.google.com/maps?q=Clinique%20du%20Marais&hl=fr"),
            "https://www.google.com/maps?q=Clinique%20du%20Marais&output=embed"
        );
    }

    #[test]
    fn embed_decodes_plus_in_q_param() {
        assert_eq!(
            to_embed_url("https://www.google.com/maps?q=Veto+Bastille"),
            "https://www.google.com/maps?q=Veto%20Bastille&output=embed"
        );
    }

    #[test]
    fn embed_appends_output_when_missing() {
        assert_eq!(
            to_embed_url("https://www.google.com/maps/place/Veto?hl=fr"),
            "https://www.google.com/maps/place/Veto?hl=fr&output=embed"
        );
    }

    #[test]
    fn embed_appends_output_to_url_without_query() {
        assert_eq!(
            to_embed_url("https://goo.gl/maps/abc123"),
            "https://goo.gl/maps/abc123?output=embed"
        );
    }

    #[test]
    fn embed_keeps_existing_output() {
        let url = "https://www.google.com/maps/place/Veto?output=classic";
        assert_eq!(to_embed_url(url), url);
    }

    #[test]
    fn embed_returns_unparseable_input_unchanged() {
        assert_eq!(to_embed_url("not a url"), "not a url");
        assert_eq!(to_embed_url(""), "");
    }
}
