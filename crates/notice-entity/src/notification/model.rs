//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notice_core::result::AppResult;

use super::kind::NotificationType;

/// Row identifier assigned by the store on insert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct NotificationId(pub i64);

impl NotificationId {
    /// Placeholder for a row that has not been inserted yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Return the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for NotificationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NotificationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A notification addressed to one user about one object.
///
/// `(user_id, object_id, notification_type)` is the natural key callers use
/// to decide between inserting and updating; it is not unique in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: String,
    /// Canonical identifier of the post, comment, etc. this is about.
    pub object_id: String,
    /// Notification category.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Serialized payload, opaque to the store.
    pub content: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the content last changed. Listings sort on this.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread, not yet inserted notification.
    pub fn new(
        user_id: impl Into<String>,
        object_id: impl Into<String>,
        notification_type: NotificationType,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NotificationId::UNASSIGNED,
            user_id: user_id.into(),
            object_id: object_id.into(),
            notification_type,
            content: content.into(),
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id != NotificationId::UNASSIGNED
    }

    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Decode the content as JSON.
    pub fn content_json<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_str(&self.content)?)
    }

    /// Replace the content with the JSON encoding of `value`.
    pub fn set_content_json<T: Serialize>(&mut self, value: &T) -> AppResult<()> {
        self.content = serde_json::to_string(value)?;
        Ok(())
    }
}
