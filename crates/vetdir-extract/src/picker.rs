//! Choosing catalog records for a requested district.

use vetdir_core::{DefaultSetPolicy, District, VenueRecord};

use crate::district::DistrictResolver;

/// Best record for `district`, in catalog (relevance) order.
///
/// A record whose postal code resolves to `district` always wins; only when
/// none does is a textual "16e"-style mention in the address accepted.
#[must_use]
pub fn pick_for_district<'a>(
    records: &'a [VenueRecord],
    district: District,
    resolver: &DistrictResolver,
) -> Option<&'a VenueRecord> {
    if let Some(exact) = records
        .iter()
        .find(|record| resolver.resolve(&record.address) == Some(district))
    {
        return Some(exact);
    }

    let mention = DistrictResolver::ordinal_mention_re(district);
    records
        .iter()
        .find(|record| mention.is_match(&record.address.to_lowercase()))
}

/// Curated short list for the policy's district: postal-code matches first,
/// then textual mentions, capped at `policy.size`.
///
/// Independent of [`pick_for_district`]; callers decide which one applies.
#[must_use]
pub fn default_set_for_district(
    records: &[VenueRecord],
    policy: DefaultSetPolicy,
    resolver: &DistrictResolver,
) -> Vec<VenueRecord> {
    let Some(district) = District::new(u32::from(policy.district), resolver.district_count())
    else {
        return Vec::new();
    };
    let mention = DistrictResolver::ordinal_mention_re(district);

    let (exact, rest): (Vec<&VenueRecord>, Vec<&VenueRecord>) = records
        .iter()
        .partition(|record| resolver.resolve(&record.address) == Some(district));

    exact
        .into_iter()
        .chain(
            rest.into_iter()
                .filter(|record| mention.is_match(&record.address.to_lowercase())),
        )
        .take(policy.size)
        .cloned()
        .collect()
}
