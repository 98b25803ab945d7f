//! Notification type discriminator.

use serde::{Deserialize, Serialize};

/// Category of a notification. Scopes read-state clearing and listings.
///
/// Stored as a plain integer so new categories need no migration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct NotificationType(pub i32);

impl NotificationType {
    /// Messages addressed to the user (answers, comments, mentions).
    pub const INBOX: Self = Self(1);
    /// Reputation and badge changes.
    pub const ACHIEVEMENT: Self = Self(2);

    /// Return the raw discriminator.
    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Return a label for known categories.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::INBOX => "inbox",
            Self::ACHIEVEMENT => "achievement",
            _ => "other",
        }
    }
}

impl From<i32> for NotificationType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.as_str(), self.0)
    }
}
