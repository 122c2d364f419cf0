use std::time::Duration;

/// Core error type for the naming service.
///
/// Adapter crates map their transport-specific errors into this type so a
/// caller sees one taxonomy no matter which chat backend produced it. None of
/// these are fatal for the save path: the generator always pairs them with a
/// usable fallback name.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("send request: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("API error: {status} {body}")]
    Status { status: u16, body: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        kind: Option<String>,
        code: Option<String>,
    },

    #[error("no choices in response")]
    EmptyChoices,

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// True for failures that happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Timeout(_) | Error::Cancelled
        )
    }

    /// True when the endpoint answered but the payload was unusable.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Error::Json(_) | Error::Api { .. } | Error::EmptyChoices
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
