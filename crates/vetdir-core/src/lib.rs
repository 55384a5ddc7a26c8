pub mod app_config;
pub mod city;
pub mod config;
pub mod venue;

pub use app_config::AppConfig;
pub use city::{load_city_profile, CityProfile, DefaultSetPolicy, PostalAlias};
pub use config::{load_app_config, load_app_config_from_env};
pub use venue::{District, ParsedReply, VenueRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read city profile at {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse city profile: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("city profile validation failed: {0}")]
    Validation(String),
}
