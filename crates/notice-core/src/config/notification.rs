//! Notification storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for the notification store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Width of a canonical object identifier; shorter ids are zero-padded.
    #[serde(default = "default_object_id_width")]
    pub object_id_width: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            object_id_width: default_object_id_width(),
        }
    }
}

fn default_object_id_width() -> usize {
    12
}
