use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::city::{load_city_profile, CityProfile};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("VETDIR_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "VETDIR_CATALOG_PATH",
        "./public/veto-cabinet.md",
    ));
    let city_profile_path = lookup("VETDIR_CITY_PROFILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let default_set_size = match lookup("VETDIR_DEFAULT_SET_SIZE") {
        Ok(raw) => {
            let size = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "VETDIR_DEFAULT_SET_SIZE".to_string(),
                    reason: e.to_string(),
                })?;
            if size == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "VETDIR_DEFAULT_SET_SIZE".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            Some(size)
        }
        Err(_) => None,
    };

    Ok(AppConfig {
        log_level,
        catalog_path,
        city_profile_path,
        default_set_size,
    })
}

impl AppConfig {
    /// Resolve the city profile: the configured YAML file when set, the
    /// built-in Paris profile otherwise, with the default-set size override
    /// applied on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured profile cannot be loaded.
    pub fn city_profile(&self) -> Result<CityProfile, ConfigError> {
        let mut profile = match &self.city_profile_path {
            Some(path) => load_city_profile(path)?,
            None => CityProfile::paris(),
        };
        if let (Some(size), Some(policy)) = (self.default_set_size, profile.default_set.as_mut()) {
            policy.size = size;
        }
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
