//! Bearer token signing and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::error::BookingError;

/// Claims carried by a session token.
///
/// Session tokens do not expire on their own; they stay valid for as long as
/// the matching session row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Owner of the token.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Issued-at timestamp (seconds since epoch). Zero when absent.
    #[serde(default)]
    pub iat: i64,
}

/// Signs and verifies session tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier for the given HMAC secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs a token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, BookingError> {
        let claims = Claims {
            user_id,
            iat: Utc::now().timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| BookingError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verifies the signature of `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] if the token is malformed or
    /// signed with another secret.
    pub fn verify(&self, token: &str) -> Result<Claims, BookingError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    BookingError::Unauthorized("invalid token signature".to_string())
                }
                _ => BookingError::Unauthorized(format!("invalid token: {e}")),
            })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let verifier = TokenVerifier::new("secret");
        let Ok(token) = verifier.issue(UserId::new(12)) else {
            panic!("signing failed");
        };
        let Ok(claims) = verifier.verify(&token) else {
            panic!("verification failed");
        };
        assert_eq!(claims.user_id, UserId::new(12));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let Ok(token) = TokenVerifier::new("one").issue(UserId::new(1)) else {
            panic!("signing failed");
        };
        let result = TokenVerifier::new("two").verify(&token);
        assert!(matches!(result, Err(BookingError::Unauthorized(_))));
    }

    #[test]
    fn token_without_iat_verifies() {
        let claims = serde_json::json!({ "userId": 7 });
        let Ok(token) = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        ) else {
            panic!("signing failed");
        };
        let Ok(decoded) = TokenVerifier::new("secret").verify(&token) else {
            panic!("verification failed");
        };
        assert_eq!(decoded.user_id, UserId::new(7));
        assert_eq!(decoded.iat, 0);
    }

    #[test]
    fn garbage_is_rejected() {
        let result = TokenVerifier::new("secret").verify("lorem");
        assert!(matches!(result, Err(BookingError::Unauthorized(_))));
    }
}
