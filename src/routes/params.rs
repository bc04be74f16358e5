//! Query parameter helpers shared by the listing endpoints.
//!
//! The types follow Rocket's `FromForm` conventions and derive `JsonSchema` so
//! the generated OpenAPI document lists the available parameters.

use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

const fn default_page() -> i64 {
    1
}

pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination over thread roots.
///
/// Only roots are paged; each returned thread always carries its full reply
/// tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, rocket::form::FromForm)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// One-based page index (defaults to the first page).
    #[field(default = 1)]
    #[serde(default = "default_page")]
    pub page: i64,
    /// Threads per page (clamped between 1 and 100; server default when absent).
    #[serde(default)]
    pub size: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: None,
        }
    }
}

impl PaginationParams {
    /// Normalized 1-based page index.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Requested page size, or `default_size`, capped at [`MAX_PAGE_SIZE`].
    pub fn size(&self, default_size: i64) -> i64 {
        self.size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset of the first thread on the page.
    pub fn offset(&self, default_size: i64) -> i64 {
        (self.page() - 1).saturating_mul(self.size(default_size))
    }
}
