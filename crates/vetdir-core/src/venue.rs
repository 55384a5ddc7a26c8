//! Canonical record shapes shared by every extraction path.

use serde::{Deserialize, Serialize};

/// A venue as shown to the user: one catalog entry, one structured-block
/// card, or one scraped map link.
///
/// `name`, `address` and `maps_url` are never empty; producers substitute
/// placeholder text when the upstream source is missing a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRecord {
    pub name: String,
    pub address: String,
    pub maps_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

impl VenueRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        maps_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            maps_url: maps_url.into(),
            booking_url: None,
        }
    }

    #[must_use]
    pub fn with_booking_url(mut self, booking_url: impl Into<String>) -> Self {
        self.booking_url = Some(booking_url.into());
        self
    }
}

/// A numbered city district, always inside `1..=district_count` of the
/// profile it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct District(u8);

impl District {
    /// Returns `None` for anything outside `1..=district_count`. Values are
    /// never clamped or wrapped.
    #[must_use]
    pub fn new(value: u32, district_count: u8) -> Option<Self> {
        let value = u8::try_from(value).ok()?;
        (1..=district_count).contains(&value).then_some(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Residual prose plus the records promoted out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReply {
    pub text: String,
    pub cards: Vec<VenueRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_rejects_zero_and_overflow() {
        assert_eq!(District::new(0, 20), None);
        assert_eq!(District::new(21, 20), None);
        assert_eq!(District::new(300, 20), None);
        assert_eq!(District::new(20, 20).map(District::get), Some(20));
        assert_eq!(District::new(1, 20).map(District::get), Some(1));
    }

    #[test]
    fn venue_serializes_with_camel_case_and_skips_missing_booking() {
        let record = VenueRecord::new("A", "B", "C");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "A", "address": "B", "mapsUrl": "C"})
        );

        let booked = record.with_booking_url("https://book.example/a");
        let json = serde_json::to_value(&booked).unwrap();
        assert_eq!(json["bookingUrl"], "https://book.example/a");
    }
}
