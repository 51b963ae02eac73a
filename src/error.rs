use thiserror::Error;

use crate::validation::ValidationErrors;

/// Everything that can go wrong between a coach action and the coaching service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server, or the response never arrived.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-2xx status. `detail` is the server's own message.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    #[error("Could not encode request body for {url}: {message}")]
    Encode { url: String, message: String },

    #[error("Unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Expected a response body from {url} but got none")]
    UnexpectedEmpty { url: String },

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    /// Status code for HTTP errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable text suitable for a transient notification.
    pub fn notification(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown APP_ENVIRONMENT '{0}'. Use development, staging or production")]
    UnknownEnvironment(String),

    #[error("COACH_API_TOKEN is required in {0}. The dev token is only allowed in development")]
    MissingToken(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
