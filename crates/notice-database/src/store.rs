//! The notification storage contract.

use async_trait::async_trait;

use notice_core::context::RequestContext;
use notice_core::result::AppResult;
use notice_core::types::pagination::PageResponse;
use notice_entity::notification::{
    Notification, NotificationId, NotificationSearch, NotificationType,
};

/// Read/write access to notification rows.
///
/// Implementations hold no per-request state and are shared across tasks.
/// Every method runs its storage call through the given [`RequestContext`];
/// any storage failure, cancellation or expired deadline surfaces as a
/// `Database` error. A missing row is never an error.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert `notification`, normalizing its `object_id` and writing the
    /// assigned id back into it.
    async fn add(&self, ctx: &RequestContext, notification: &mut Notification) -> AppResult<()>;

    /// Replace `content` and bump `updated_at` to now for the row with
    /// `notification.id`. Updating a missing row is a no-op.
    async fn update_content(
        &self,
        ctx: &RequestContext,
        notification: &mut Notification,
    ) -> AppResult<()>;

    /// Mark every notification of `user_id` with `notification_type` as read.
    async fn clear_unread_by_type(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        notification_type: NotificationType,
    ) -> AppResult<()>;

    /// Mark one notification as read, only if it belongs to `user_id`.
    async fn clear_unread_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        id: NotificationId,
    ) -> AppResult<()>;

    /// Look a notification up by id.
    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> AppResult<Option<Notification>>;

    /// Look a notification up by its natural key. `object_id` may be short.
    async fn get_by_user_object_type(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        object_id: &str,
        notification_type: NotificationType,
    ) -> AppResult<Option<Notification>>;

    /// List a user's notifications, most recently updated first.
    ///
    /// An empty `user_id` yields an empty page without touching storage.
    async fn list_page(
        &self,
        ctx: &RequestContext,
        search: &NotificationSearch,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications, optionally of one type.
    async fn count_unread(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        notification_type: Option<NotificationType>,
    ) -> AppResult<u64>;
}
