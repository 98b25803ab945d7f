//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use notice_core::config::{DatabaseConfig, NotificationConfig};
use notice_core::types::object_id::PaddedIdCanonicalizer;
use notice_database::{
    DatabasePool, MemoryNotificationRepository, NotificationStore, PgNotificationRepository,
};

/// Environment variable naming the PostgreSQL instance used by the tests.
pub const DATABASE_URL_VAR: &str = "NOTICE_TEST_DATABASE_URL";

/// A store backed by process memory, canonicalizing with default settings.
pub fn memory_store() -> Arc<dyn NotificationStore> {
    memory_store_with(&NotificationConfig::default())
}

/// A store backed by process memory, canonicalizing per `config`.
pub fn memory_store_with(config: &NotificationConfig) -> Arc<dyn NotificationStore> {
    Arc::new(MemoryNotificationRepository::new(Arc::new(
        PaddedIdCanonicalizer::from(config),
    )))
}

/// A migrated PostgreSQL store, or `None` when no test database is configured.
pub async fn postgres_store() -> Option<Arc<dyn NotificationStore>> {
    let url = std::env::var(DATABASE_URL_VAR).ok()?;
    let mut config = DatabaseConfig::with_url(url);
    config.min_connections = 0;
    config.max_connections = 4;

    let db = DatabasePool::connect_lazy(&config).expect("Invalid test database URL");
    notice_database::migration::run_migrations(db.pool())
        .await
        .expect("Failed to run migrations");

    Some(Arc::new(PgNotificationRepository::new(
        db.into_pool(),
        Arc::new(PaddedIdCanonicalizer::from(&NotificationConfig::default())),
    )))
}

static USER_SEQ: AtomicU64 = AtomicU64::new(0);

/// A user id no other test uses, so tests can share one database.
pub fn unique_user(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = USER_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{nanos}-{seq}")
}
