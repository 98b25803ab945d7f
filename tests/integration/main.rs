//! Integration tests for the notification store.

mod helpers;
mod notification_test;
