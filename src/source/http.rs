use reqwest::Url;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::source::DataSource;

/// Fetches payloads over HTTP.
///
/// Locations are resolved against `base_url` the way a browser resolves
/// links: `/data/x.json` is relative to the host root, `data/x.json` to the
/// base path.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    /// Create a source with a default [`reqwest::Client`].
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a source using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| StatsError::InvalidLocation {
            location: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http: client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, location: &str) -> Result<Url> {
        self.base_url
            .join(location)
            .map_err(|e| StatsError::InvalidLocation {
                location: location.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl DataSource for HttpSource {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        let url = self.resolve(location)?;
        debug!(location, %url, "fetching payload");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StatsError::Http {
                location: location.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::UnexpectedStatus {
                location: location.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| StatsError::ResponseBody {
            location: location.to_owned(),
            source: e,
        })
    }
}
