use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A postal code that does not follow the `<prefix><district>` scheme but
/// still belongs to a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAlias {
    pub code: String,
    pub district: u8,
}

/// Curated short list returned whenever a user asks about one specific
/// district, instead of the single best match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSetPolicy {
    pub district: u8,
    pub size: usize,
}

/// Everything the engine needs to know about the target city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityProfile {
    pub name: String,
    /// First three digits shared by every district postal code.
    pub postal_prefix: String,
    pub district_count: u8,
    #[serde(default)]
    pub aliases: Vec<PostalAlias>,
    pub placeholder_name: String,
    pub placeholder_address: String,
    #[serde(default)]
    pub default_set: Option<DefaultSetPolicy>,
}

impl CityProfile {
    #[must_use]
    pub fn paris() -> Self {
        Self {
            name: "Paris".to_string(),
            postal_prefix: "750".to_string(),
            district_count: 20,
            aliases: vec![PostalAlias {
                code: "75116".to_string(),
                district: 16,
            }],
            placeholder_name: "Vétérinaire".to_string(),
            placeholder_address: "Paris".to_string(),
            default_set: Some(DefaultSetPolicy {
                district: 16,
                size: 3,
            }),
        }
    }
}

impl Default for CityProfile {
    fn default() -> Self {
        Self::paris()
    }
}

/// Load and validate a city profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_city_profile(path: &Path) -> Result<CityProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: CityProfile = serde_yaml::from_str(&content)?;
    validate_city_profile(&profile)?;

    Ok(profile)
}

fn is_ascii_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn validate_city_profile(profile: &CityProfile) -> Result<(), ConfigError> {
    if profile.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "city name must be non-empty".to_string(),
        ));
    }

    if !is_ascii_digits(&profile.postal_prefix, 3) {
        return Err(ConfigError::Validation(format!(
            "postal prefix '{}' must be exactly 3 digits",
            profile.postal_prefix
        )));
    }

    if !(1..=99).contains(&profile.district_count) {
        return Err(ConfigError::Validation(format!(
            "district count {} must be between 1 and 99",
            profile.district_count
        )));
    }

    let in_range = |district: u8| (1..=profile.district_count).contains(&district);

    let mut seen_codes = HashSet::new();
    for alias in &profile.aliases {
        if !is_ascii_digits(&alias.code, 5) {
            return Err(ConfigError::Validation(format!(
                "postal alias '{}' must be exactly 5 digits",
                alias.code
            )));
        }
        if !in_range(alias.district) {
            return Err(ConfigError::Validation(format!(
                "postal alias '{}' points to district {} outside 1..={}",
                alias.code, alias.district, profile.district_count
            )));
        }
        if !seen_codes.insert(alias.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate postal alias: '{}'",
                alias.code
            )));
        }
    }

    if profile.placeholder_name.trim().is_empty()
        || profile.placeholder_address.trim().is_empty()
    {
        return Err(ConfigError::Validation(
            "placeholder name and address must be non-empty".to_string(),
        ));
    }

    if let Some(policy) = profile.default_set {
        if policy.size == 0 {
            return Err(ConfigError::Validation(
                "default set size must be at least 1".to_string(),
            ));
        }
        if !in_range(policy.district) {
            return Err(ConfigError::Validation(format!(
                "default set district {} outside 1..={}",
                policy.district, profile.district_count
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "city_test.rs"]
mod tests;
