//! # notice-entity
//!
//! Entity model for the notification store. [`notification::Notification`]
//! maps one row of the `notifications` table and derives `Debug`, `Clone`,
//! `Serialize`, `Deserialize` and `sqlx::FromRow`.

pub mod notification;
