//! Error types for the ThoughtSpot client.

use std::fmt;
use thiserror::Error;

/// Result type alias for ThoughtSpot operations.
pub type ThoughtSpotResult<T> = Result<T, ThoughtSpotError>;

/// Classification of a login or token-acquisition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    /// The server rejected the credentials (HTTP 401/403).
    InvalidCredentials,
    /// The server answered with a non-auth HTTP error.
    ServerError,
    /// The request never produced an HTTP response.
    Network,
}

impl fmt::Display for AuthFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid_credentials"),
            Self::ServerError => write!(f, "server_error"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A failed API call: any non-2xx HTTP response, or a 2xx response whose
/// body carries an embedded application-level error (the TML import/export
/// family reports validation failures this way).
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code of the response (200 for embedded errors).
    pub status: u16,
    /// Raw response body. Callers must not assume a particular shape.
    pub body: String,
    /// True when the error was embedded in a 2xx JSON body.
    pub embedded: bool,
    /// Best-effort error message parsed from the body.
    pub message: Option<String>,
    /// Full parsed body for embedded errors, so sibling results in a
    /// multi-object response stay inspectable.
    pub payload: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.embedded {
            write!(f, "API error embedded in HTTP {} response", self.status)?;
        } else {
            write!(f, "API error (HTTP {})", self.status)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Builds an error from a non-2xx response status and body.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(parse_error_message);
        Self {
            status,
            body,
            embedded: false,
            message,
            payload: None,
        }
    }

    /// Builds an embedded-error value from a 2xx JSON body.
    pub fn embedded(message: Option<String>, payload: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: payload.to_string(),
            embedded: true,
            message,
            payload: Some(payload),
        }
    }

    /// True when the status indicates rejected credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

// The two error body shapes seen in the wild: a top-level "message" string,
// or V1's {"type": ..., "debug": ...} envelope.
fn parse_error_message(body: &serde_json::Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    body.get("debug").and_then(|d| d.as_str()).map(String::from)
}

/// Top-level error type for the ThoughtSpot client.
#[derive(Error, Debug)]
pub enum ThoughtSpotError {
    /// Invalid client construction parameters.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// Network or connection failure before any HTTP response arrived.
    #[error("transport error: {source}")]
    Transport {
        /// The underlying reqwest failure.
        #[from]
        source: reqwest::Error,
    },

    /// The server answered, and the answer was an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A login or token-acquisition call failed.
    #[error("authentication failed ({reason})")]
    Auth {
        /// Failure classification.
        reason: AuthFailureReason,
        /// The underlying API or transport error, when one exists.
        #[source]
        source: Option<Box<ThoughtSpotError>>,
    },

    /// The response body did not parse as the expected content type.
    #[error("decode error: {message}")]
    Decode {
        /// What failed to parse.
        message: String,
    },
}

impl ThoughtSpotError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status of the failed call, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Auth {
                source: Some(inner),
                ..
            } => inner.status_code(),
            _ => None,
        }
    }

    /// The API error payload, when this error carries one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Auth {
                source: Some(inner),
                ..
            } => inner.api(),
            _ => None,
        }
    }

    /// Wraps a login-path failure into an `Auth` error with the reason
    /// classified from the underlying cause.
    pub(crate) fn into_auth(self) -> Self {
        let reason = match &self {
            Self::Api(e) if e.is_unauthorized() => AuthFailureReason::InvalidCredentials,
            Self::Api(_) => AuthFailureReason::ServerError,
            Self::Transport { .. } => AuthFailureReason::Network,
            _ => AuthFailureReason::ServerError,
        };
        Self::Auth {
            reason,
            source: Some(Box::new(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_parses_message_field() {
        let error = ApiError::from_status(400, r#"{"message": "bad request"}"#.to_string());
        assert_eq!(error.message.as_deref(), Some("bad request"));
        assert!(!error.embedded);
    }

    #[test]
    fn api_error_tolerates_non_json_body() {
        let error = ApiError::from_status(502, "<html>Bad Gateway</html>".to_string());
        assert_eq!(error.message, None);
        assert_eq!(error.status, 502);
    }

    #[test]
    fn auth_wrapping_classifies_reason() {
        let unauthorized: ThoughtSpotError =
            ApiError::from_status(401, String::new()).into();
        match unauthorized.into_auth() {
            ThoughtSpotError::Auth { reason, .. } => {
                assert_eq!(reason, AuthFailureReason::InvalidCredentials)
            }
            other => panic!("unexpected error: {other}"),
        }

        let server: ThoughtSpotError = ApiError::from_status(500, String::new()).into();
        match server.into_auth() {
            ThoughtSpotError::Auth { reason, .. } => {
                assert_eq!(reason, AuthFailureReason::ServerError)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_code_reaches_through_auth_wrapper() {
        let error: ThoughtSpotError = ApiError::from_status(403, String::new()).into();
        let wrapped = error.into_auth();
        assert_eq!(wrapped.status_code(), Some(403));
    }

    #[test]
    fn embedded_error_display() {
        let error = ApiError::embedded(
            Some("invalid TML".to_string()),
            serde_json::json!({"object": []}),
        );
        let display = format!("{}", error);
        assert!(display.contains("embedded"));
        assert!(display.contains("invalid TML"));
    }
}
