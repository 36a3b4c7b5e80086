use std::path::PathBuf;

/// Environment variable that overrides the records file path.
pub const DATA_PATH_ENV: &str = "LAND_DASHBOARD_DATA";

const DEFAULT_DATA_FILE: &str = "Rajupalem Land Records.xlsx";
const DEFAULT_TITLE: &str = "Rajupalem Land Dashboard";
const DEFAULT_LOCATION: &str = "Village: Rajupalem, Mandal: Kothapatnam, District: Prakasam 523280";

/// Startup settings for the dashboard window.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Records file loaded at startup.
    pub data_path: PathBuf,
    /// Window title and page heading.
    pub title: String,
    /// Location line shown under the heading.
    pub location: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            title: DEFAULT_TITLE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the data path taken from [`DATA_PATH_ENV`] when set.
    pub fn from_env() -> Self {
        Self::with_data_override(std::env::var(DATA_PATH_ENV).ok())
    }

    fn with_data_override(data_path: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = data_path.filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }
        config
    }
}
