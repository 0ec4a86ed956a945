use thiserror::Error;

/// Faults that abort a lookup. Recoverable conditions (vehicle not found,
/// ambiguous charge table, thin MOT history) are reported inside the
/// response envelope instead.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("anti-forgery token not found on the vehicle checker entry page")]
    TokenNotFound,

    #[error("request event has no `vrn` query parameter")]
    MissingVrn,

    #[error("MOT API key is not configured (set MOT_API_KEY or mot.api_key)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("MOT history response is not valid JSON: {0}")]
    InvalidMotResponse(#[source] serde_json::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
