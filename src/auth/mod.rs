//! Bearer token authentication.
//!
//! A request is authenticated when its token carries a valid signature and a
//! session with exactly that token exists in the store. The user id comes
//! from the token claims.

pub mod extractor;
pub mod token;

use std::sync::Arc;

pub use extractor::AuthUser;
pub use token::{Claims, TokenVerifier};

use crate::domain::UserId;
use crate::error::BookingError;
use crate::persistence::BookingStore;

/// Resolves bearer tokens to users.
#[derive(Debug, Clone)]
pub struct Authenticator {
    verifier: TokenVerifier,
    store: Arc<dyn BookingStore>,
}

impl Authenticator {
    /// Creates an authenticator checking sessions in `store`.
    #[must_use]
    pub fn new(verifier: TokenVerifier, store: Arc<dyn BookingStore>) -> Self {
        Self { verifier, store }
    }

    /// Authenticates `token`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] if the token is invalid or has
    /// no session, and propagates store failures.
    pub async fn authenticate(&self, token: &str) -> Result<UserId, BookingError> {
        let claims = self.verifier.verify(token)?;

        if self.store.session_user(token).await?.is_none() {
            return Err(BookingError::Unauthorized(
                "no session for token".to_string(),
            ));
        }

        Ok(claims.user_id)
    }
}
