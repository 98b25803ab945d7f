//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod search;

pub use kind::NotificationType;
pub use model::{Notification, NotificationId};
pub use search::NotificationSearch;
