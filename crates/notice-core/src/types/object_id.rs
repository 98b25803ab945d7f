//! Object identifier normalization.
//!
//! Callers may refer to a notification's subject by a shortened public
//! identifier. Storage only ever holds the canonical form, so every write
//! and every equality lookup on `object_id` passes through an
//! [`IdCanonicalizer`] first.

use std::fmt;

use crate::config::NotificationConfig;

/// Maps a short or canonical object identifier to its canonical form.
///
/// Implementations must be pure and idempotent:
/// `canonicalize(canonicalize(x)) == canonicalize(x)`.
pub trait IdCanonicalizer: Send + Sync + fmt::Debug + 'static {
    /// Return the canonical form of `id`.
    fn canonicalize(&self, id: &str) -> String;
}

/// Canonical ids are fixed-width; short ids are left-padded with `'0'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedIdCanonicalizer {
    width: usize,
}

impl PaddedIdCanonicalizer {
    /// Create a canonicalizer for ids of `width` characters.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// The canonical width.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for PaddedIdCanonicalizer {
    fn default() -> Self {
        Self::new(12)
    }
}

impl From<&NotificationConfig> for PaddedIdCanonicalizer {
    fn from(config: &NotificationConfig) -> Self {
        Self::new(config.object_id_width)
    }
}

impl IdCanonicalizer for PaddedIdCanonicalizer {
    fn canonicalize(&self, id: &str) -> String {
        let len = id.chars().count();
        if id.is_empty() || len >= self.width {
            return id.to_string();
        }
        let mut canonical = "0".repeat(self.width - len);
        canonical.push_str(id);
        canonical
    }
}
