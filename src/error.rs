use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kinds surfaced by repositories and services.
///
/// Store and signing failures are logged and returned opaque; everything else
/// maps to a client-facing status code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("invalid identifier format")]
    InvalidIdFormat,

    #[error("identifier mismatch")]
    IdentifierMismatch,

    #[error("invalid code")]
    InvalidCode,

    #[error("database error")]
    Database(#[from] mongodb::error::Error),

    #[error("token error")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::InvalidIdFormat => StatusCode::BAD_REQUEST,
            Self::IdentifierMismatch => StatusCode::FORBIDDEN,
            Self::InvalidCode => StatusCode::UNAUTHORIZED,
            Self::Database(err) => {
                error!("Database error: {err}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
                    .into_response();
            }
            Self::Token(err) => {
                error!("Token error: {err}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
                    .into_response();
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::NotFound("user"), StatusCode::NOT_FOUND),
            (Error::AlreadyExists("auth attempt"), StatusCode::CONFLICT),
            (Error::InvalidIdFormat, StatusCode::BAD_REQUEST),
            (Error::IdentifierMismatch, StatusCode::FORBIDDEN),
            (Error::InvalidCode, StatusCode::UNAUTHORIZED),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(Error::NotFound("course").to_string(), "course not found");
    }
}
