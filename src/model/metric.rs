use serde::Serialize;

/// A discovered metric key together with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricOption {
    pub key: String,
    pub label: String,
}
