//! Users and their login sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SessionId, UserId};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row identifier.
    pub id: UserId,
    /// Login e-mail, unique across users.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A login session binding a bearer token to a user.
///
/// A token is only accepted while a session carrying exactly that token
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Row identifier.
    pub id: SessionId,
    /// Owner of the session.
    pub user_id: UserId,
    /// Bearer token issued for this session.
    pub token: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
