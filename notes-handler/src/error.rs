//! Error taxonomy shared by every endpoint
//!
//! Every failure an endpoint can report is one of the [`NoteError`] variants.
//! Each variant maps to exactly one HTTP status code, except [`NoteError::Api`]
//! which carries its own optional status and falls back to 500.

use http::StatusCode;
use thiserror::Error;

/// Discriminant of a [`NoteError`], useful for logging and matching
/// without borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Api,
    BadRequest,
    Unauthorized,
    NotFound,
    Unclassified,
}

/// Failure raised by an endpoint function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoteError {
    /// Domain error raised explicitly by an endpoint.
    #[error("{message}")]
    Api {
        message: String,
        description: Option<String>,
        status: Option<StatusCode>,
    },

    /// The request was missing a parameter or carried an unusable body.
    #[error("{message}")]
    BadRequest {
        message: String,
        description: Option<String>,
    },

    /// No caller identity could be resolved for the request.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Any failure nobody classified, typically surfaced by the store.
    #[error("{0}")]
    Unclassified(String),
}

impl NoteError {
    /// Domain error without description or status. Reported as a 500.
    pub fn api(message: impl Into<String>) -> Self {
        NoteError::Api {
            message: message.into(),
            description: None,
            status: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        NoteError::BadRequest {
            message: message.into(),
            description: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        NoteError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        NoteError::NotFound {
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        NoteError::Unclassified(message.into())
    }

    /// Attach a description. Ignored by variants that carry none.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            NoteError::Api { description, .. } | NoteError::BadRequest { description, .. } => {
                *description = Some(text.into());
            }
            _ => {}
        }
        self
    }

    /// Declare the status of an [`NoteError::Api`] error. Other variants
    /// keep their fixed mapping.
    pub fn with_status(mut self, code: StatusCode) -> Self {
        if let NoteError::Api { status, .. } = &mut self {
            *status = Some(code);
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NoteError::Api { .. } => ErrorKind::Api,
            NoteError::BadRequest { .. } => ErrorKind::BadRequest,
            NoteError::Unauthorized { .. } => ErrorKind::Unauthorized,
            NoteError::NotFound { .. } => ErrorKind::NotFound,
            NoteError::Unclassified(_) => ErrorKind::Unclassified,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            NoteError::Api { message, .. }
            | NoteError::BadRequest { message, .. }
            | NoteError::Unauthorized { message }
            | NoteError::NotFound { message } => message,
            NoteError::Unclassified(message) => message,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            NoteError::Api { description, .. } | NoteError::BadRequest { description, .. } => {
                description.as_deref()
            }
            _ => None,
        }
    }

    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NoteError::Api { status, .. } => status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            NoteError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            NoteError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            NoteError::NotFound { .. } => StatusCode::NOT_FOUND,
            NoteError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for NoteError {
    fn from(err: serde_json::Error) -> Self {
        NoteError::Unclassified(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_defaults_to_internal_server_error() {
        let err = NoteError::api("timeout");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.description(), None);
    }

    #[test]
    fn api_error_uses_declared_status() {
        let err = NoteError::api("slow down")
            .with_status(StatusCode::TOO_MANY_REQUESTS)
            .with_description("retry later");
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.message(), "slow down");
        assert_eq!(err.description(), Some("retry later"));
    }

    #[test]
    fn fixed_variants_ignore_declared_status() {
        let err = NoteError::not_found("Item not found.").with_status(StatusCode::IM_A_TEAPOT);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(NoteError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(NoteError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            NoteError::unclassified("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(NoteError::unclassified("boom").to_string(), "boom");
        assert_eq!(
            NoteError::bad_request("missing id").with_description("path").to_string(),
            "missing id"
        );
    }
}
