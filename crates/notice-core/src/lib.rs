//! # notice-core
//!
//! Core crate for the notification store. Contains configuration schemas,
//! the per-request context used for cancellation and deadlines,
//! pagination/sorting/filter types, object identifier normalization,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other notice crates.

pub mod config;
pub mod context;
pub mod error;
pub mod result;
pub mod types;

pub use context::RequestContext;
pub use error::AppError;
pub use result::AppResult;
