//! In-memory notification store for single-node deployments and tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use notice_core::context::RequestContext;
use notice_core::result::AppResult;
use notice_core::types::object_id::IdCanonicalizer;
use notice_core::types::pagination::PageResponse;
use notice_entity::notification::{
    Notification, NotificationId, NotificationSearch, NotificationType,
};

use crate::store::NotificationStore;

/// Notification store holding rows in a process-local map.
#[derive(Debug)]
pub struct MemoryNotificationRepository {
    /// Rows keyed by id.
    rows: RwLock<BTreeMap<NotificationId, Notification>>,
    /// Last assigned id.
    sequence: AtomicI64,
    canonicalizer: Arc<dyn IdCanonicalizer>,
}

impl MemoryNotificationRepository {
    /// Create an empty store.
    pub fn new(canonicalizer: Arc<dyn IdCanonicalizer>) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
            canonicalizer,
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationRepository {
    async fn add(&self, ctx: &RequestContext, notification: &mut Notification) -> AppResult<()> {
        notification.object_id = self.canonicalizer.canonicalize(&notification.object_id);
        if notification.updated_at < notification.created_at {
            notification.updated_at = notification.created_at;
        }

        let id = ctx
            .run("add notification", async {
                let id = NotificationId(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
                let mut row = notification.clone();
                row.id = id;
                self.rows.write().await.insert(id, row);
                Ok(id)
            })
            .await?;

        notification.id = id;
        debug!(id = %id, user_id = %notification.user_id, "Notification added");
        Ok(())
    }

    async fn update_content(
        &self,
        ctx: &RequestContext,
        notification: &mut Notification,
    ) -> AppResult<()> {
        notification.updated_at = Utc::now();
        notification.object_id = self.canonicalizer.canonicalize(&notification.object_id);

        let stored = ctx
            .run("update notification content", async {
                let mut rows = self.rows.write().await;
                Ok(rows.get_mut(&notification.id).map(|row| {
                    row.content = notification.content.clone();
                    row.updated_at = notification.updated_at.max(row.created_at);
                    row.updated_at
                }))
            })
            .await?;

        if let Some(updated_at) = stored {
            notification.updated_at = updated_at;
        }
        Ok(())
    }

    async fn clear_unread_by_type(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        notification_type: NotificationType,
    ) -> AppResult<()> {
        ctx.run("clear unread by type", async {
            let mut rows = self.rows.write().await;
            rows.values_mut()
                .filter(|n| n.user_id == user_id && n.notification_type == notification_type)
                .for_each(|n| n.is_read = true);
            Ok(())
        })
        .await
    }

    async fn clear_unread_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        id: NotificationId,
    ) -> AppResult<()> {
        ctx.run("clear unread by id", async {
            if let Some(row) = self.rows.write().await.get_mut(&id) {
                if row.user_id == user_id {
                    row.is_read = true;
                }
            }
            Ok(())
        })
        .await
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> AppResult<Option<Notification>> {
        ctx.run("get notification", async {
            Ok(self.rows.read().await.get(&id).cloned())
        })
        .await
    }

    async fn get_by_user_object_type(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        object_id: &str,
        notification_type: NotificationType,
    ) -> AppResult<Option<Notification>> {
        let object_id = self.canonicalizer.canonicalize(object_id);
        ctx.run("get notification by object", async {
            let rows = self.rows.read().await;
            Ok(rows
                .values()
                .rev()
                .find(|n| {
                    n.user_id == user_id
                        && n.object_id == object_id
                        && n.notification_type == notification_type
                })
                .cloned())
        })
        .await
    }

    async fn list_page(
        &self,
        ctx: &RequestContext,
        search: &NotificationSearch,
    ) -> AppResult<PageResponse<Notification>> {
        let page = search.page.normalized();
        if search.user_id.is_empty() {
            return Ok(PageResponse::empty(&page));
        }

        let (items, total) = ctx
            .run("list notifications", async {
                let rows = self.rows.read().await;
                let mut matching: Vec<&Notification> = rows
                    .values()
                    .filter(|n| n.user_id == search.user_id)
                    .filter(|n| {
                        search
                            .notification_type
                            .is_none_or(|t| n.notification_type == t)
                    })
                    .collect();
                matching.sort_by(|a, b| {
                    b.updated_at
                        .cmp(&a.updated_at)
                        .then_with(|| b.id.cmp(&a.id))
                });

                let total = matching.len() as u64;
                let items: Vec<Notification> = matching
                    .into_iter()
                    .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                    .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                    .cloned()
                    .collect();
                Ok((items, total))
            })
            .await?;

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count_unread(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        notification_type: Option<NotificationType>,
    ) -> AppResult<u64> {
        if user_id.is_empty() {
            return Ok(0);
        }

        ctx.run("count unread notifications", async {
            let rows = self.rows.read().await;
            let count = rows
                .values()
                .filter(|n| n.user_id == user_id && n.is_unread())
                .filter(|n| notification_type.is_none_or(|t| n.notification_type == t))
                .count();
            Ok(count as u64)
        })
        .await
    }
}
