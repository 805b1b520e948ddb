pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, verify_unknown_user};
pub use token::{Claims, TokenIssuer};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Form fields of an OAuth2-style password grant (`POST /token`).
///
/// Every field is optional at the parsing stage so that a missing field is
/// rejected the same way as a wrong one.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl TokenRequest {
    /// `grant_type` must be `password`, compared case-insensitively.
    pub fn is_password_grant(&self) -> bool {
        self.grant_type
            .as_deref()
            .map(|grant| grant.eq_ignore_ascii_case("password"))
            .unwrap_or(false)
    }
}

/// Body returned by a successful `POST /token`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Represents the payload for a new account (`POST /register`).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Must be between 3 and 32 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_password_grant_detection() {
        let grant = |value: Option<&str>| TokenRequest {
            grant_type: value.map(str::to_string),
            ..Default::default()
        };
        assert!(grant(Some("password")).is_password_grant());
        assert!(grant(Some("PassWord")).is_password_grant());
        assert!(!grant(Some("client_credentials")).is_password_grant());
        assert!(!grant(Some("")).is_password_grant());
        assert!(!grant(None).is_password_grant());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse::bearer("abc".into(), 3600)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "access_token": "abc",
                "token_type": "Bearer",
                "expires_in": 3600
            })
        );
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            username: "test user!".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            username: "tu".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());

        let short_password_register = RegisterRequest {
            username: "someone".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_register.validate().is_err());
    }
}
