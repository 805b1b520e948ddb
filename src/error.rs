//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can produce is one of its variants, and every variant is rendered
//! to the client with the same JSON envelope:
//!
//! ```json
//! { "code": 404, "message": "Not Found" }
//! ```
//!
//! When a variant carries an empty message, the canonical reason phrase of its status code is
//! sent instead. The token endpoint relies on this so that "unknown user" and "wrong password"
//! produce byte-identical bodies.
//!
//! `From` conversions exist for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` so handlers can use `?`.

use actix_web::{
    error::ResponseError,
    http::{header, StatusCode},
    HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request, bad grant type or rejected credentials (HTTP 400).
    BadRequest(String),
    /// Request input failed validation, e.g. a blank item body (HTTP 400).
    ValidationError(String),
    /// No bearer token was presented (HTTP 401).
    Unauthorized(String),
    /// A bearer token was presented but is invalid or expired (HTTP 401).
    InvalidToken(String),
    /// The authenticated user may not touch this resource (HTTP 403).
    Forbidden(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The resource exists but does not support the method (HTTP 405).
    MethodNotAllowed(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// A failure reported by the storage layer (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    /// Builds a 400 with an empty message, rendered as the bare reason phrase.
    pub fn bad_request() -> Self {
        AppError::BadRequest(String::new())
    }

    pub fn forbidden() -> Self {
        AppError::Forbidden(String::new())
    }

    pub fn not_found() -> Self {
        AppError::NotFound(String::new())
    }

    /// The message sent to the client.
    ///
    /// Server-side errors never leak their detail; it goes to the log instead.
    pub fn message(&self) -> String {
        let msg = match self {
            AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::InvalidToken(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::MethodNotAllowed(msg) => msg.as_str(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => "",
        };
        if msg.is_empty() {
            self.status_code()
                .canonical_reason()
                .unwrap_or_default()
                .to_string()
        } else {
            msg.to_string()
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidToken(msg) => write!(f, "Invalid Token: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::MethodNotAllowed(msg) => write!(f, "Method Not Allowed: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `{code, message}` JSON responses.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        let mut builder = HttpResponse::build(status);
        match self {
            AppError::Unauthorized(_) => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::InvalidToken(_) => {
                builder.insert_header((header::WWW_AUTHENTICATE, r#"Bearer error="invalid_token""#));
            }
            _ => {}
        }
        builder.json(json!({
            "code": status.as_u16(),
            "message": self.message(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; anything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::not_found(),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// JWT failures surface as an invalid bearer token.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
