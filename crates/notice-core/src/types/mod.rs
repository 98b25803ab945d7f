//! Core type definitions shared by the notice crates.

pub mod filter;
pub mod object_id;
pub mod pagination;
pub mod sorting;

pub use filter::{FilterField, FilterValue};
pub use object_id::{IdCanonicalizer, PaddedIdCanonicalizer};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{SortDirection, SortField};
