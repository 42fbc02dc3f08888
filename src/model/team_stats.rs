use std::collections::BTreeMap;

use serde::Serialize;

/// Per-team statistics for one season.
///
/// `metrics` holds every non-identifying field of the source row, coerced
/// to a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonStats {
    pub team: String,
    pub season: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
}

impl TeamSeasonStats {
    /// Value of a metric, or `None` when the source row did not carry it.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }
}
