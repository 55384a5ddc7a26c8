//! District resolution from postal addresses and from conversational text.

use std::sync::LazyLock;

use regex::Regex;
use vetdir_core::{CityProfile, District};

/// Ordinal suffixes accepted after a district number ("11e", "1er",
/// "16ème", "3ieme"). Longer alternatives come first so `er` wins over `e`.
pub(crate) const ORDINAL_SUFFIX: &str = "(?:ième|ieme|ème|eme|er|e)";

static DEFAULT_RESOLVER: LazyLock<DistrictResolver> =
    LazyLock::new(|| DistrictResolver::new(&CityProfile::paris()));

/// Maps addresses and utterances to districts of one city.
#[derive(Debug, Clone)]
pub struct DistrictResolver {
    district_count: u8,
    postal_code_re: Regex,
    prefix: String,
    aliases: Vec<(String, District)>,
    utterance_patterns: Vec<Regex>,
}

impl DistrictResolver {
    #[must_use]
    pub fn new(profile: &CityProfile) -> Self {
        let city = regex::escape(&profile.name.to_lowercase());
        let utterance_patterns = [
            format!(r"\b{city}\s*(\d{{1,2}})\b"),
            format!(r"\b(\d{{1,2}})\s*{ORDINAL_SUFFIX}\b"),
            r"\b(\d{1,2})\s*(?:arrondissement|arrdt|ardt|arr)\b".to_string(),
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect();

        let aliases = profile
            .aliases
            .iter()
            .filter_map(|alias| {
                District::new(u32::from(alias.district), profile.district_count)
                    .map(|district| (alias.code.clone(), district))
            })
            .collect();

        Self {
            district_count: profile.district_count,
            postal_code_re: Regex::new(r"\b(\d{5})\b").expect("valid regex"),
            prefix: profile.postal_prefix.clone(),
            aliases,
            utterance_patterns,
        }
    }

    #[must_use]
    pub fn district_count(&self) -> u8 {
        self.district_count
    }

    /// Resolve a postal address to its district.
    ///
    /// A `<prefix>NN` postal code wins when `NN` is a valid district; alias
    /// codes are checked only after that. Digits outside a 5-digit postal
    /// code are never interpreted.
    #[must_use]
    pub fn resolve(&self, address: &str) -> Option<District> {
        let codes: Vec<&str> = self
            .postal_code_re
            .captures_iter(address)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        let by_suffix = codes.iter().find_map(|code| {
            let suffix = code.strip_prefix(self.prefix.as_str())?;
            District::new(suffix.parse().ok()?, self.district_count)
        });
        if by_suffix.is_some() {
            return by_suffix;
        }

        codes.iter().find_map(|code| {
            self.aliases
                .iter()
                .find(|(alias, _)| alias == code)
                .map(|(_, district)| *district)
        })
    }

    /// Find a district mentioned in a user's question, e.g. "un véto
    /// paris 11", "dans le 16ème", "15 arr.".
    ///
    /// Patterns are tried in order; a pattern whose number is out of range
    /// does not stop the search.
    #[must_use]
    pub fn from_utterance(&self, text: &str) -> Option<District> {
        let lower = text.to_lowercase();
        self.utterance_patterns.iter().find_map(|re| {
            re.captures_iter(&lower).find_map(|caps| {
                let number = caps.get(1)?.as_str().parse().ok()?;
                District::new(number, self.district_count)
            })
        })
    }

    /// Matches a lower-cased address that names `district` with an ordinal
    /// suffix ("16e", "16ème"). Used when no postal code resolves.
    pub(crate) fn ordinal_mention_re(district: District) -> Regex {
        Regex::new(&format!(r"\b{district}{ORDINAL_SUFFIX}\b")).expect("valid regex")
    }
}

impl Default for DistrictResolver {
    fn default() -> Self {
        DEFAULT_RESOLVER.clone()
    }
}

/// [`DistrictResolver::resolve`] against the built-in Paris profile.
#[must_use]
pub fn resolve_address(address: &str) -> Option<District> {
    DEFAULT_RESOLVER.resolve(address)
}

/// [`DistrictResolver::from_utterance`] against the built-in Paris profile.
#[must_use]
pub fn district_from_utterance(text: &str) -> Option<District> {
    DEFAULT_RESOLVER.from_utterance(text)
}

#[cfg(test)]
#[path = "district_test.rs"]
mod tests;
