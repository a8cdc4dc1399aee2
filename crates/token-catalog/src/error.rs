use thiserror::Error;

/// Unified error type for the token catalog library.
#[derive(Debug, Error)]
pub enum Error {
    /// The reference list and its fallback both failed.
    #[error("token list not available: {primary}; fallback: {fallback}")]
    Unavailable {
        primary: FetchError,
        #[source]
        fallback: FetchError,
    },

    #[error("config error: {0}")]
    Config(String),
}

/// Errors while fetching one of the two catalogs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid catalog body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
