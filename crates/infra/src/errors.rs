//! Infra error types and conversions into the domain error

use reqwest::StatusCode;
use thiserror::Error;
use timebridge_domain::TimebridgeError;

/// Errors raised by the HTTP and API adapters.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InfraError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server(_) | Self::RateLimit(_) | Self::Network(_))
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let message = if body.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {body}")
        };
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            status if status.is_server_error() => Self::Server(message),
            _ => Self::Client(message),
        }
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<InfraError> for TimebridgeError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Auth(message) => Self::Auth(message),
            InfraError::Config(message) => Self::Config(message),
            InfraError::Network(message) => Self::Network(message),
            InfraError::Decode(message)
            | InfraError::RateLimit(message)
            | InfraError::Server(message)
            | InfraError::Client(message) => Self::Api(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            InfraError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            InfraError::Auth(_)
        ));
        assert!(matches!(
            InfraError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            InfraError::RateLimit(_)
        ));
        assert!(matches!(
            InfraError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            InfraError::Server(_)
        ));
        assert!(matches!(
            InfraError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            InfraError::Client(_)
        ));
    }

    #[test]
    fn retryability() {
        assert!(InfraError::Server("502".into()).is_retryable());
        assert!(InfraError::Network("timed out".into()).is_retryable());
        assert!(!InfraError::Client("422".into()).is_retryable());
        assert!(!InfraError::Auth("401".into()).is_retryable());
    }
}
