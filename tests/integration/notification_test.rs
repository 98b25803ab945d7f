//! Store behaviour exercised through `Arc<dyn NotificationStore>`.
//!
//! Each scenario is a plain async function so the PostgreSQL suite can run
//! the same checks against a real database.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use notice_core::RequestContext;
use notice_core::config::NotificationConfig;
use notice_core::types::pagination::PageRequest;
use notice_database::NotificationStore;
use notice_entity::notification::{
    Notification, NotificationId, NotificationSearch, NotificationType,
};

use crate::helpers;

pub async fn scenario_add_then_read_back(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("scenario");

    let mut n = Notification::new(&user, "abc123", NotificationType::INBOX, r#"{"n":1}"#);
    store.add(&ctx, &mut n).await.unwrap();
    assert!(n.is_persisted());
    assert_eq!(n.object_id, "000000abc123");

    let found = store
        .get_by_user_object_type(&ctx, &user, "000000abc123", NotificationType::INBOX)
        .await
        .unwrap()
        .expect("notification exists");
    assert_eq!(found.id, n.id);
    assert_eq!(found.object_id, "000000abc123");
    assert!(!found.is_read);

    store
        .clear_unread_by_type(&ctx, &user, NotificationType::INBOX)
        .await
        .unwrap();
    let read = store.get_by_id(&ctx, n.id).await.unwrap().unwrap();
    assert!(read.is_read);
}

pub async fn scenario_update_content(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("update");

    let mut n = Notification::new(&user, "q1", NotificationType::INBOX, "first");
    store.add(&ctx, &mut n).await.unwrap();
    let before = store.get_by_id(&ctx, n.id).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    n.content = "second".to_string();
    n.object_id = "q1".to_string();
    store.update_content(&ctx, &mut n).await.unwrap();
    assert_eq!(n.object_id, "0000000000q1");

    let after = store.get_by_id(&ctx, n.id).await.unwrap().unwrap();
    assert_eq!(after.content, "second");
    assert!(after.updated_at > before.updated_at);
    assert!(after.updated_at >= after.created_at);
    assert_eq!(after.created_at, before.created_at);

    let mut ghost = Notification::new(&user, "q1", NotificationType::INBOX, "ghost");
    ghost.id = NotificationId(i64::MAX);
    store.update_content(&ctx, &mut ghost).await.unwrap();
    assert!(store.get_by_id(&ctx, ghost.id).await.unwrap().is_none());
}

pub async fn scenario_cross_user_isolation(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user_a = helpers::unique_user("a");
    let user_b = helpers::unique_user("b");

    let mut theirs = Notification::new(&user_b, "p9", NotificationType::INBOX, "{}");
    store.add(&ctx, &mut theirs).await.unwrap();

    store.clear_unread_by_id(&ctx, &user_a, theirs.id).await.unwrap();
    let after = store.get_by_id(&ctx, theirs.id).await.unwrap().unwrap();
    assert!(!after.is_read);

    store.clear_unread_by_id(&ctx, &user_b, theirs.id).await.unwrap();
    let after = store.get_by_id(&ctx, theirs.id).await.unwrap().unwrap();
    assert!(after.is_read);
}

pub async fn scenario_listing(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("list");
    let base = Utc::now() - TimeDelta::minutes(10);

    let mut ids = Vec::new();
    for (i, object) in ["t1", "t2", "t3"].into_iter().enumerate() {
        let mut n = Notification::new(&user, object, NotificationType::INBOX, "{}");
        n.created_at = base + TimeDelta::seconds(i as i64);
        n.updated_at = n.created_at;
        store.add(&ctx, &mut n).await.unwrap();
        ids.push(n.id);
    }
    let mut badge = Notification::new(&user, "t4", NotificationType::ACHIEVEMENT, "{}");
    badge.created_at = base - TimeDelta::seconds(30);
    badge.updated_at = badge.created_at;
    store.add(&ctx, &mut badge).await.unwrap();

    let search =
        NotificationSearch::new(&user, PageRequest::new(1, 2)).with_type(NotificationType::INBOX);
    let page = store.list_page(&ctx, &search).await.unwrap();
    assert_eq!(page.total_items, 3);
    assert_eq!(
        page.items.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![ids[2], ids[1]]
    );

    let everything = store
        .list_page(&ctx, &NotificationSearch::new(&user, PageRequest::new(1, 10)))
        .await
        .unwrap();
    assert_eq!(everything.total_items, 4);
    assert_eq!(everything.items.last().map(|n| n.id), Some(badge.id));

    assert_eq!(store.count_unread(&ctx, &user, None).await.unwrap(), 4);
    assert_eq!(
        store
            .count_unread(&ctx, &user, Some(NotificationType::ACHIEVEMENT))
            .await
            .unwrap(),
        1
    );

    let unscoped = NotificationSearch::new("", PageRequest::new(1, 10));
    let empty = store.list_page(&ctx, &unscoped).await.unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total_items, 0);
}

pub async fn scenario_future_created_at(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("future");

    let mut n = Notification::new(&user, "f1", NotificationType::INBOX, "before");
    n.created_at = Utc::now() + TimeDelta::hours(1);
    n.updated_at = n.created_at;
    store.add(&ctx, &mut n).await.unwrap();

    n.content = "after".to_string();
    store.update_content(&ctx, &mut n).await.unwrap();

    let stored = store.get_by_id(&ctx, n.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "after");
    assert_eq!(n.updated_at, stored.updated_at);
    assert!(stored.updated_at >= stored.created_at);
}

pub async fn scenario_duplicate_natural_key(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("dup");

    let mut older = Notification::new(&user, "d1", NotificationType::INBOX, "old");
    store.add(&ctx, &mut older).await.unwrap();
    let mut newer = Notification::new(&user, "d1", NotificationType::INBOX, "new");
    store.add(&ctx, &mut newer).await.unwrap();

    let found = store
        .get_by_user_object_type(&ctx, &user, "d1", NotificationType::INBOX)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, newer.id);
    assert_eq!(found.content, "new");
}

pub async fn scenario_page_far_past_the_end(store: Arc<dyn NotificationStore>) {
    let ctx = RequestContext::new();
    let user = helpers::unique_user("far");
    for object in ["1", "2"] {
        let mut n = Notification::new(&user, object, NotificationType::INBOX, "{}");
        store.add(&ctx, &mut n).await.unwrap();
    }

    let raw = NotificationSearch {
        page: PageRequest {
            page: u64::MAX,
            page_size: u64::MAX,
        },
        ..NotificationSearch::new(&user, PageRequest::default())
    };
    let page = store.list_page(&ctx, &raw).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 2);
}

#[tokio::test]
async fn test_memory_add_then_read_back() {
    scenario_add_then_read_back(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_update_content() {
    scenario_update_content(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_cross_user_isolation() {
    scenario_cross_user_isolation(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_listing() {
    scenario_listing(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_future_created_at() {
    scenario_future_created_at(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_duplicate_natural_key() {
    scenario_duplicate_natural_key(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_memory_page_far_past_the_end() {
    scenario_page_far_past_the_end(helpers::memory_store()).await;
}

#[tokio::test]
async fn test_configured_object_id_width() {
    let store = helpers::memory_store_with(&NotificationConfig { object_id_width: 19 });
    let ctx = RequestContext::new();
    let user = helpers::unique_user("width");

    let mut n = Notification::new(&user, "abc123", NotificationType::INBOX, "{}");
    store.add(&ctx, &mut n).await.unwrap();
    assert_eq!(n.object_id.len(), 19);
    assert_eq!(n.object_id, "0000000000000abc123");

    let found = store
        .get_by_user_object_type(&ctx, &user, "abc123", NotificationType::INBOX)
        .await
        .unwrap();
    assert_eq!(found.map(|f| f.id), Some(n.id));
}

#[tokio::test]
async fn test_concurrent_adds_get_distinct_ids() {
    let store = helpers::memory_store();
    let user = helpers::unique_user("concurrent");

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            let user = user.clone();
            tokio::spawn(async move {
                let mut n =
                    Notification::new(user, format!("obj{i}"), NotificationType::INBOX, "{}");
                store.add(&RequestContext::new(), &mut n).await.unwrap();
                n.id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let ctx = RequestContext::new();
    assert_eq!(store.count_unread(&ctx, &user, None).await.unwrap(), 16);
}
