/// All errors that can occur while loading or querying football datasets.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {location}: {source}")]
    Http {
        location: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {location}")]
    UnexpectedStatus {
        location: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {location}: {source}")]
    ResponseBody {
        location: String,
        source: reqwest::Error,
    },

    /// A location could not be resolved against the source's base.
    #[error("invalid location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Reading a local file failed.
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    /// The payload was fetched but is not valid JSON.
    #[error("invalid JSON in {location}: {source}")]
    Json {
        location: String,
        source: serde_json::Error,
    },

    /// A payload could not be fetched, even after the fallback attempt.
    #[error("source unavailable: {location}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: Box<StatsError>,
    },

    /// None of the candidate locations produced any match data.
    #[error("no data available after {attempts} attempt(s)")]
    NoDataAvailable { attempts: usize },

    /// A standings mode string was not recognized.
    #[error("invalid mode: {0}")]
    InvalidMode(#[from] strum::ParseError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
