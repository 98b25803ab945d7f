//! # notice-database
//!
//! PostgreSQL connection management, migrations, and the
//! [`NotificationStore`] implementations.

pub mod connection;
pub mod migration;
pub mod pager;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryNotificationRepository, PgNotificationRepository};
pub use store::NotificationStore;
