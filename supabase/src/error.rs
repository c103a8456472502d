//! Error types for the Supabase REST client

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to a Supabase project
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SupabaseError {
    /// The project URL could not be parsed
    #[error("Invalid project URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// PostgREST answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from PostgREST, or the raw body
        message: String,
    },

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// An insert asked for the created row but none came back
    #[error("Expected a row in the response, got none")]
    EmptyResponse,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    code: Option<String>,
}

impl SupabaseError {
    /// Build an [`SupabaseError::Api`] from a status and response body
    ///
    /// PostgREST errors are JSON objects with `message` and `code`; anything
    /// else is kept verbatim so no detail is lost.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<PostgrestErrorBody>(body) {
            Ok(PostgrestErrorBody {
                message: Some(message),
                code: Some(code),
            }) => format!("{message} ({code})"),
            Ok(PostgrestErrorBody {
                message: Some(message),
                code: None,
            }) => message,
            _ if body.trim().is_empty() => "empty response body".to_string(),
            _ => body.trim().to_string(),
        };

        Self::Api { status, message }
    }
}
