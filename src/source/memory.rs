use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::error::{Result, StatsError};
use crate::source::DataSource;

/// Payloads held in memory, keyed by exact location.
///
/// Records every requested location, which makes fallback behavior easy
/// to observe.
#[derive(Debug, Default)]
pub struct MemorySource {
    payloads: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(location, body);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, body: impl Into<String>) {
        self.payloads.insert(location.into(), body.into());
    }

    /// Locations requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl DataSource for MemorySource {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        if let Ok(mut log) = self.requested.lock() {
            log.push(location.to_owned());
        }
        self.payloads
            .get(location)
            .cloned()
            .ok_or_else(|| StatsError::Io {
                location: location.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no payload at this location"),
            })
    }
}
