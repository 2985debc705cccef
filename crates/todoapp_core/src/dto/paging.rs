//! Pagination request normalization and paged result shape.
//!
//! # Invariants
//! - `page_number >= 1`; `page_size` in `1..=MAX_PAGE_SIZE`.
//! - Oversized page sizes are clamped, never rejected.
//! - `total_pages = ceil(total_count / page_size)`.

use super::validation::{ValidationError, Validator};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw pagination query (`?pageNumber=&pageSize=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: i64::from(DEFAULT_PAGE_NUMBER),
            page_size: i64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Validated page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Rejects non-positive values and clamps `page_size` to `MAX_PAGE_SIZE`.
    pub fn normalize(&self) -> Result<Page, ValidationError> {
        let max_size = i64::from(MAX_PAGE_SIZE);
        let page_size = self.page_size.min(max_size);
        Validator::new()
            .range("pageNumber", self.page_number, 1, i64::from(u32::MAX))
            .range("pageSize", page_size, 1, max_size)
            .finish()?;

        Ok(Page {
            number: self.page_number as u32,
            size: page_size as u32,
        })
    }
}

fn default_page_number() -> i64 {
    i64::from(DEFAULT_PAGE_NUMBER)
}

fn default_page_size() -> i64 {
    i64::from(DEFAULT_PAGE_SIZE)
}

/// One page of items plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, total_count: u64, page: Page) -> Self {
        let total_pages = total_count.div_ceil(u64::from(page.size.max(1)));
        Self {
            data,
            total_count,
            page_number: page.number,
            page_size: page.size,
            total_pages,
            has_previous_page: page.number > 1,
            has_next_page: u64::from(page.number) < total_pages,
        }
    }
}
