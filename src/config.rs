use serde::{Deserialize, Serialize};

use crate::collation::Locale;
use crate::error::{Result, StatsError};

pub const DEFAULT_MATCHES_LOCATION: &str = "/data/csvjson.json";
pub const DEFAULT_STATS_LOCATION: &str = "/data/csvjson (1).json";

/// Where the match and stats payloads live, relative to a [`DataSource`].
///
/// [`DataSource`]: crate::DataSource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLocations {
    pub matches: String,
    pub stats: String,
}

impl DataLocations {
    pub fn new(matches: impl Into<String>, stats: impl Into<String>) -> Self {
        Self {
            matches: matches.into(),
            stats: stats.into(),
        }
    }

    /// Candidate locations tried when the deployment layout is unknown,
    /// nearest directory first.
    pub fn fallback_candidates() -> Vec<Self> {
        ["data/", "../data/", "../../data/", "/data/"]
            .into_iter()
            .map(|dir| Self::new(format!("{dir}csvjson.json"), format!("{dir}csvjson (1).json")))
            .collect()
    }
}

impl Default for DataLocations {
    fn default() -> Self {
        Self::new(DEFAULT_MATCHES_LOCATION, DEFAULT_STATS_LOCATION)
    }
}

/// How `home` and `away` standings select their fixtures.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModeFiltering {
    /// `home` counts only home fixtures, `away` only away fixtures.
    #[default]
    Split,
    /// Every mode yields the global table, as earlier releases did.
    Legacy,
}

/// Settings for a [`StatsRepository`](crate::StatsRepository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Collation for metric labels and team-name tie-breaks.
    pub locale: Locale,
    pub mode_filtering: ModeFiltering,
    /// Used by `load_default`.
    pub locations: DataLocations,
    /// Used by `load_first_available_default`.
    pub fallback_locations: Vec<DataLocations>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            mode_filtering: ModeFiltering::default(),
            locations: DataLocations::default(),
            fallback_locations: DataLocations::fallback_candidates(),
        }
    }
}

impl RepositoryConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| StatsError::Json {
            location: "<config>".to_owned(),
            source,
        })
    }
}
