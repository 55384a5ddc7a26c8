//! End-to-end flows over a raw reply and over a user utterance.

use serde::Serialize;
use vetdir_core::{CityProfile, District, ParsedReply, VenueRecord};

use crate::block::extract_structured_block;
use crate::district::DistrictResolver;
use crate::links::{scrape_map_links_for, strip_map_links};
use crate::picker::{default_set_for_district, pick_for_district};

/// Which selection rule produced a [`DistrictCards`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictSelection {
    /// The curated short list configured for this district.
    DefaultSet,
    /// The general picker's single best match.
    Picked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictCards {
    pub district: District,
    pub selection: DistrictSelection,
    pub cards: Vec<VenueRecord>,
}

/// [`process_reply_for`] with the built-in Paris profile.
#[must_use]
pub fn process_reply(reply: &str) -> ParsedReply {
    process_reply_for(reply, &CityProfile::paris())
}

/// Turn a raw assistant reply into display text plus cards.
///
/// Map links are scraped only when the structured block produced no card,
/// so the two sources never mix. Links are stripped from the text either way.
#[must_use]
pub fn process_reply_for(reply: &str, profile: &CityProfile) -> ParsedReply {
    let ParsedReply { text, cards } = extract_structured_block(reply);

    let cards = if cards.is_empty() {
        let scraped = scrape_map_links_for(&text, profile);
        if !scraped.is_empty() {
            tracing::debug!(count = scraped.len(), "falling back to scraped map links");
        }
        scraped
    } else {
        cards
    };

    ParsedReply {
        text: strip_map_links(&text),
        cards,
    }
}

/// Cards for the district named in `utterance`, or `None` when it names none.
///
/// The profile's default-set district takes precedence over the general
/// picker. An empty `cards` list means the district was understood but the
/// catalog has nothing for it.
#[must_use]
pub fn cards_for_utterance(
    utterance: &str,
    catalog: &[VenueRecord],
    profile: &CityProfile,
) -> Option<DistrictCards> {
    let resolver = DistrictResolver::new(profile);
    let district = resolver.from_utterance(utterance)?;

    let result = match profile.default_set {
        Some(policy) if policy.district == district.get() => DistrictCards {
            district,
            selection: DistrictSelection::DefaultSet,
            cards: default_set_for_district(catalog, policy, &resolver),
        },
        _ => DistrictCards {
            district,
            selection: DistrictSelection::Picked,
            cards: pick_for_district(catalog, district, &resolver)
                .cloned()
                .into_iter()
                .collect(),
        },
    };

    tracing::debug!(
        district = district.get(),
        selection = ?result.selection,
        count = result.cards.len(),
        "selected cards for utterance"
    );
    Some(result)
}
