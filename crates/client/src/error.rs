use autolist_core::error::QueryError;

/// Shown when neither the server nor the transport produced a message.
pub const FALLBACK_MESSAGE: &str = "Failed to fetch automations";

/// Errors raised by the listing client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A query update was rejected locally before reaching the server.
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed to encode query string: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl ClientError {
    /// Text to show the user. Prefers the server's own message, then a
    /// generic transport message, then [`FALLBACK_MESSAGE`]. Never empty.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Server { status, .. } => format!("Request failed with status code {status}"),
            Self::Transport(err) => err.to_string(),
            Self::Query(err) => err.to_string(),
            Self::Encode(err) => err.to_string(),
        };

        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = ClientError::Server {
            status: 400,
            message: Some("Invalid sort order. Must be \"asc\" or \"desc\"".into()),
        };
        assert_eq!(
            err.user_message(),
            "Invalid sort order. Must be \"asc\" or \"desc\""
        );
    }

    #[test]
    fn missing_server_message_falls_back_to_status_text() {
        let err = ClientError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 500");

        let err = ClientError::Server {
            status: 502,
            message: Some("  ".into()),
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn local_query_errors_use_their_message() {
        let err = ClientError::from(QueryError::InvalidPagination);
        assert!(err.user_message().starts_with("Invalid pagination parameters"));
    }

    #[test]
    fn display_includes_status() {
        let err = ClientError::Server {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "server returned 404: <no message>");
    }
}
