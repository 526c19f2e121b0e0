use thiserror::Error;

/// Custom error type for fetching data, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Bad URL {0}: {1}")]
    BadUrl(String, String),
    #[error("Can not put credentials into {0}")]
    BadCredentials(String),
    #[error("HTTP Error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error reading body: {0}")]
    Body(reqwest::Error),
}
