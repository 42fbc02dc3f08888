//! Where raw payloads come from.

mod file;
mod http;
mod memory;

use std::future::Future;

use serde_json::Value;
use tracing::{debug, instrument, warn};

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::MemorySource;

use crate::error::{Result, StatsError};

/// A fetcher of raw payload text, addressed by location strings such as
/// `/data/csvjson.json`.
pub trait DataSource {
    /// Fetch the text stored at `location`.
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetch `location` and parse it as JSON.
pub async fn fetch_json<S: DataSource>(source: &S, location: &str) -> Result<Value> {
    let body = source.fetch_text(location).await?;
    debug!(location, bytes = body.len(), "fetched payload");
    serde_json::from_str(&body).map_err(|e| StatsError::Json {
        location: location.to_owned(),
        source: e,
    })
}

/// Fetch `location` as JSON, retrying once with its leading `/` removed.
///
/// Fails with [`StatsError::SourceUnavailable`] when the retry fails too.
#[instrument(skip(source))]
pub async fn fetch_json_with_fallback<S: DataSource>(source: &S, location: &str) -> Result<Value> {
    match fetch_json(source, location).await {
        Ok(payload) => Ok(payload),
        Err(e) => {
            let fallback = location.strip_prefix('/').unwrap_or(location);
            warn!(location, fallback, error = %e, "fetch failed, retrying with relative location");
            fetch_json(source, fallback)
                .await
                .map_err(|e| StatsError::SourceUnavailable {
                    location: location.to_owned(),
                    source: Box::new(e),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_strips_leading_slash() {
        let source = MemorySource::new().with("data/m.json", "[1, 2]");
        let payload = fetch_json_with_fallback(&source, "/data/m.json").await.unwrap();
        assert_eq!(payload.as_array().map(Vec::len), Some(2));
        assert_eq!(source.requested(), vec!["/data/m.json", "data/m.json"]);
    }

    #[tokio::test]
    async fn test_fallback_not_needed() {
        let source = MemorySource::new().with("/data/m.json", "{}");
        fetch_json_with_fallback(&source, "/data/m.json").await.unwrap();
        assert_eq!(source.requested(), vec!["/data/m.json"]);
    }

    #[tokio::test]
    async fn test_invalid_json_is_retried_then_reported() {
        let source = MemorySource::new()
            .with("/m.json", "not json")
            .with("m.json", "{ broken");
        let err = fetch_json_with_fallback(&source, "/m.json").await.unwrap_err();
        match err {
            StatsError::SourceUnavailable { location, source } => {
                assert_eq!(location, "/m.json");
                assert!(matches!(*source, StatsError::Json { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_relative_location_retries_same_path() {
        let source = MemorySource::new();
        let err = fetch_json_with_fallback(&source, "m.json").await.unwrap_err();
        assert!(matches!(err, StatsError::SourceUnavailable { .. }));
        assert_eq!(source.requested(), vec!["m.json", "m.json"]);
    }
}
