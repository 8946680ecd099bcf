//! Error types for gw2-snapshot.
//!
//! Only conditions that abort a run live here. A failed probe or an
//! undecodable body is an ordinary outcome recorded on the response record.

use std::path::PathBuf;

/// Error type for snapshot and scaffold operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog entry cannot be turned into an endpoint.
    #[error("Invalid endpoint path {path:?}: {reason}")]
    InvalidEndpoint { path: String, reason: &'static str },

    /// The base URL joined with a route does not parse as an absolute URL.
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only http and https endpoints can be probed.
    #[error("Unsupported scheme {scheme:?} in base URL {url:?}")]
    UnsupportedScheme { url: String, scheme: String },

    /// The worker pool must have at least one worker.
    #[error("Concurrency must be at least 1")]
    InvalidConcurrency,

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The worker pool could not be built.
    #[error("Worker pool setup failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Reading a catalog/source file or writing an artifact failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A decoded payload could not be serialized back to JSON. Fatal.
    #[error("Could not serialize {} to JSON: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing report lines to the console failed.
    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),

    /// The scaffold tool only reads Rust sources.
    #[error("Not a Rust source file: {}", .0.display())]
    NotRustSource(PathBuf),

    /// A scaffold fixture payload is not valid JSON.
    #[error("Fixture {name} is not valid JSON: {source}")]
    Fixture {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;
