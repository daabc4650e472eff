//! Shared query parameter types for API handlers.

use serde::Deserialize;
use snippets_core::pagination::{clamp_limit, clamp_offset, MAX_PAGE_SIZE};

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Resolve to a clamped `(limit, offset)` pair.
    pub fn resolve(&self, default_limit: i64) -> (i64, i64) {
        (
            clamp_limit(self.limit, default_limit, MAX_PAGE_SIZE),
            clamp_offset(self.offset),
        )
    }
}
