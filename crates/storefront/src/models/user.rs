//! User model for the mocked authentication flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{Email, UserId};

/// A signed-in user.
///
/// Produced by the mock auth service and persisted under
/// [`crate::storage::keys::CURRENT_USER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID (always 1 in the mock flow).
    pub id: UserId,
    /// Validated email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}
