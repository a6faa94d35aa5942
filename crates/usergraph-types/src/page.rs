//! Offset pagination over already-sorted result lists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GlobalConfig;

/// Invalid pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
}

/// A validated page window: `page` is zero-based, `page_size` items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    page: u32,
    page_size: u32,
}

impl Page {
    /// Validate raw parameters. Values above `u32::MAX` saturate.
    pub fn new(page: i64, page_size: i64) -> Result<Self, PageError> {
        if page < 0 {
            return Err(PageError::Negative {
                field: "page",
                value: page,
            });
        }
        if page_size < 0 {
            return Err(PageError::Negative {
                field: "pageSize",
                value: page_size,
            });
        }
        Ok(Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            page_size: u32::try_from(page_size).unwrap_or(u32::MAX),
        })
    }

    /// Build a page from optional query values.
    ///
    /// A missing page is 0, a missing size is `default_page_size`, and any
    /// size is clamped to `max_page_size`. Negative values are rejected.
    pub fn resolve(
        config: &GlobalConfig,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Self, PageError> {
        let max = i64::from(config.max_page_size);
        let size = page_size
            .unwrap_or(i64::from(config.default_page_size))
            .min(max);
        Self::new(page.unwrap_or(0), size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    /// Slice `items` down to this page (skip, then limit).
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .into_iter()
            .skip(skip)
            .take(self.page_size as usize)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 20,
        }
    }
}
