use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub city_profile_path: Option<PathBuf>,
    /// Overrides the default-set size of the loaded city profile.
    pub default_set_size: Option<usize>,
}
