//! PostgreSQL notification repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use notice_core::context::RequestContext;
use notice_core::error::AppError;
use notice_core::result::AppResult;
use notice_core::types::filter::FilterField;
use notice_core::types::object_id::IdCanonicalizer;
use notice_core::types::pagination::PageResponse;
use notice_core::types::sorting::SortField;
use notice_entity::notification::{
    Notification, NotificationId, NotificationSearch, NotificationType,
};

use crate::pager;
use crate::store::NotificationStore;

const TABLE: &str = "notifications";

/// Notification store backed by the `notifications` table.
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
    canonicalizer: Arc<dyn IdCanonicalizer>,
}

impl PgNotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool, canonicalizer: Arc<dyn IdCanonicalizer>) -> Self {
        Self {
            pool,
            canonicalizer,
        }
    }

    fn listing_filter(search: &NotificationSearch) -> Vec<FilterField> {
        let mut filter = vec![FilterField::eq("user_id", search.user_id.as_str())];
        if let Some(notification_type) = search.notification_type {
            filter.push(FilterField::eq("\"type\"", notification_type.as_i32()));
        }
        filter
    }
}

#[async_trait]
impl NotificationStore for PgNotificationRepository {
    async fn add(&self, ctx: &RequestContext, notification: &mut Notification) -> AppResult<()> {
        notification.object_id = self.canonicalizer.canonicalize(&notification.object_id);
        if notification.updated_at < notification.created_at {
            notification.updated_at = notification.created_at;
        }

        let id: NotificationId = ctx
            .run("add notification", async {
                sqlx::query_scalar::<_, NotificationId>(
                    "INSERT INTO notifications (user_id, object_id, \"type\", content, is_read, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
                )
                .bind(&notification.user_id)
                .bind(&notification.object_id)
                .bind(notification.notification_type)
                .bind(&notification.content)
                .bind(notification.is_read)
                .bind(notification.created_at)
                .bind(notification.updated_at)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::storage_fault("Failed to create notification", e))
            })
            .await?;

        notification.id = id;
        debug!(
            id = %id,
            user_id = %notification.user_id,
            notification_type = %notification.notification_type,
            "Notification added"
        );
        Ok(())
    }

    async fn update_content(
        &self,
        ctx: &RequestContext,
        notification: &mut Notification,
    ) -> AppResult<()> {
        notification.updated_at = Utc::now();
        notification.object_id = self.canonicalizer.canonicalize(&notification.object_id);

        // A row created in the future keeps updated_at >= created_at.
        let stored: Option<DateTime<Utc>> = ctx
            .run("update notification content", async {
                sqlx::query_scalar::<_, DateTime<Utc>>(
                    "UPDATE notifications SET content = $1, updated_at = GREATEST($2, created_at) \
                     WHERE id = $3 RETURNING updated_at",
                )
                .bind(&notification.content)
                .bind(notification.updated_at)
                .bind(notification.id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::storage_fault("Failed to update notification content", e))
            })
            .await?;

        if let Some(updated_at) = stored {
            notification.updated_at = updated_at;
        }
        debug!(
            id = %notification.id,
            matched = stored.is_some(),
            "Notification content updated"
        );
        Ok(())
    }

    async fn clear_unread_by_type(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        notification_type: NotificationType,
    ) -> AppResult<()> {
        let result = ctx
            .run("clear unread by type", async {
                sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND \"type\" = $2")
                    .bind(user_id)
                    .bind(notification_type)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| AppError::storage_fault("Failed to mark notifications read", e))
            })
            .await?;

        debug!(
            user_id,
            notification_type = %notification_type,
            rows = result.rows_affected(),
            "Cleared unread notifications"
        );
        Ok(())
    }

    async fn clear_unread_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        id: NotificationId,
    ) -> AppResult<()> {
        let result = ctx
            .run("clear unread by id", async {
                sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND id = $2")
                    .bind(user_id)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| AppError::storage_fault("Failed to mark notification read", e))
            })
            .await?;

        debug!(user_id, id = %id, rows = result.rows_affected(), "Cleared unread notification");
        Ok(())
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> AppResult<Option<Notification>> {
        ctx.run("get notification", async {
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::storage_fault("Failed to get notification", e))
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
            sqlx::query_as::<_, Notification>(
                "SELECT * FROM notifications WHERE user_id = $1 AND object_id = $2 AND \"type\" = $3 \
                 ORDER BY id DESC LIMIT 1",
            )
            .bind(user_id)
            .bind(&object_id)
            .bind(notification_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage_fault("Failed to get notification by object", e))
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

        let filter = Self::listing_filter(search);
        let order = [SortField::desc("updated_at"), SortField::desc("id")];
        let (items, total) = ctx
            .run("list notifications", async {
                pager::paginate::<Notification>(&self.pool, TABLE, &filter, &order, &page)
                    .await
                    .map_err(|e| AppError::storage_fault("Failed to list notifications", e))
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

        let count: i64 = ctx
            .run("count unread notifications", async {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM notifications \
                     WHERE user_id = $1 AND is_read = FALSE AND ($2::INTEGER IS NULL OR \"type\" = $2)",
                )
                .bind(user_id)
                .bind(notification_type)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::storage_fault("Failed to count unread", e))
            })
            .await?;
        Ok(count as u64)
    }
}
