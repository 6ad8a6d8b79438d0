// Error taxonomy for datasource operations
use thiserror::Error;

/// Result type for datasource operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure a datasource call can surface.
///
/// The set is closed: a call either reaches the server and gets a usable
/// response, fails to decode it, or was misconfigured before it started.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network failure or a non-2xx status from the server.
    #[error("request to {url} failed: {message}")]
    Transport {
        url: String,
        status: Option<u16>,
        body: Option<String>,
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create a transport error that never got a response
    pub fn transport<U: Into<String>, M: ToString>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            status: None,
            body: None,
            message: message.to_string(),
        }
    }

    /// Create a transport error for a non-success status
    pub fn status<U: Into<String>>(url: U, status: u16, body: String) -> Self {
        Self::Transport {
            url: url.into(),
            status: Some(status),
            message: format!("server responded with status {}: {}", status, body),
            body: Some(body),
        }
    }

    /// Create a decode error with a short description of what was being decoded
    pub fn decode<C: Into<String>, M: ToString>(context: C, message: M) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    /// HTTP status of a failed call, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
