//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. It wraps transport and serialization errors, and
//! carries the server's own message when a request is rejected.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure: connection refused, timeout, broken body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` is the `error` field of the response body when present,
    /// otherwise the raw body or the status line.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided failure reason.
        message: String,
    },

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    /// Text suitable for showing to the end user.
    ///
    /// Server rejections yield the server's message verbatim; every other
    /// variant yields its full description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a server rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_user_message_is_verbatim() {
        let err = SdkError::Server {
            status: 400,
            message: "Template 'a' already exists".into(),
        };
        assert_eq!(err.user_message(), "Template 'a' already exists");
        assert_eq!(err.to_string(), "server error (400): Template 'a' already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn config_error_user_message_is_description() {
        let err = SdkError::Config("bad url".into());
        assert_eq!(err.user_message(), "configuration error: bad url");
        assert_eq!(err.status(), None);
    }
}
