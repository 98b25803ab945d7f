//! Notification store implementations.

pub mod memory;
pub mod notification;

pub use memory::MemoryNotificationRepository;
pub use notification::PgNotificationRepository;
