//! Catalog document renderer.
//!
//! Produces the exact format [`crate::catalog::parse_catalog`] reads, from
//! place-search results already fetched by an external job.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::maps_url::{coordinates_url, search_url};

pub(crate) const UNKNOWN_NAME: &str = "Nom inconnu";
pub(crate) const UNKNOWN_ADDRESS: &str = "Adresse inconnue";

/// One place-search result, in the provider's JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlacesPayload {
    List(Vec<PlaceResult>),
    Page { results: Vec<PlaceResult> },
}

/// Parse place results from either a bare JSON array or a search response
/// page (`{"results": [...]}`).
///
/// # Errors
///
/// Returns the `serde_json` error when the input matches neither shape.
pub fn parse_places(json: &str) -> Result<Vec<PlaceResult>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        PlacesPayload::List(places) | PlacesPayload::Page { results: places } => places,
    })
}

/// Render a catalog document: unique places (by `place_id`, first wins),
/// best-rated first.
#[must_use]
pub fn render_catalog(city: &str, places: &[PlaceResult]) -> String {
    let mut seen = HashSet::new();
    let mut unique: Vec<&PlaceResult> = places
        .iter()
        .filter(|place| match place.place_id.as_deref() {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect();
    unique.sort_by(|a, b| {
        b.rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0))
    });

    tracing::debug!(
        total = places.len(),
        unique = unique.len(),
        "rendering catalog document"
    );

    let body = unique
        .iter()
        .map(|place| render_entry(place))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "# Cabinets vétérinaires — {city}\n\nNombre: {}\n\n{body}\n",
        unique.len()
    )
}

fn render_entry(place: &PlaceResult) -> String {
    let name = first_present(&[place.name.as_deref()]).unwrap_or(UNKNOWN_NAME);
    let address = first_present(&[
        place.formatted_address.as_deref(),
        place.vicinity.as_deref(),
    ])
    .unwrap_or(UNKNOWN_ADDRESS);

    let rating = match place.rating {
        Some(rating) if rating > 0.0 => format!(
            " — Note: {rating} ({})",
            place.user_ratings_total.unwrap_or(0)
        ),
        _ => String::new(),
    };

    let maps_url = match place.geometry.as_ref().and_then(|g| g.location) {
        Some(LatLng { lat, lng }) => coordinates_url(lat, lng),
        None => search_url(name, address),
    };

    format!("- **{name}** — {address}{rating}\n  - Maps: {maps_url}")
}

fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .map(str::trim)
        .find(|s| !s.is_empty())
}
