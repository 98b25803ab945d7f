//! Listing criteria.

use serde::{Deserialize, Serialize};

use notice_core::types::pagination::PageRequest;

use super::kind::NotificationType;

/// Criteria for a paginated notification listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationSearch {
    /// Owner of the listed notifications. An empty id lists nothing.
    pub user_id: String,
    /// Restrict to one category; `None` lists every category.
    #[serde(default, rename = "type")]
    pub notification_type: Option<NotificationType>,
    /// Page to return.
    #[serde(flatten)]
    pub page: PageRequest,
}

impl NotificationSearch {
    /// Criteria for every category of `user_id`.
    pub fn new(user_id: impl Into<String>, page: PageRequest) -> Self {
        Self {
            user_id: user_id.into(),
            notification_type: None,
            page,
        }
    }

    /// Restrict the listing to one category.
    pub fn with_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = Some(notification_type);
        self
    }
}
