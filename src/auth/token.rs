use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's identifier.
    pub sub: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs and verifies bearer tokens with a shared HMAC secret.
///
/// Built once from the configuration and shared with handlers and the
/// `AuthMiddleware` through `web::Data`.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    /// Generates a token for `user_id`, returning it with its lifetime in seconds.
    pub fn generate_token(&self, user_id: i32) -> Result<(String, i64), AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::seconds(self.expires_in))
            .ok_or_else(|| AppError::InternalServerError("Token expiration overflow".into()))?;

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))?;
        Ok((token, self.expires_in))
    }

    /// Verifies a token's signature and expiration and decodes its claims.
    ///
    /// Returns `AppError::InvalidToken` if the token is malformed, forged or expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}
