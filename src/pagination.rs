use serde::Deserialize;

use crate::error::AppError;

pub const MAX_PER_PAGE: u32 = 100;

/// Raw `?page=&per_page=` query. Unparsable values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Requested page size, clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(&self, default: u32) -> u32 {
        self.per_page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(default)
            .clamp(1, MAX_PER_PAGE)
    }
}

/// One page of a collection of `total` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl Pagination {
    /// Fails with 404 for pages before the first or past the last one.
    /// Page 1 always exists, even when the collection is empty.
    pub fn new(page: i64, per_page: u32, total: i64) -> Result<Self, AppError> {
        let pagination = Self {
            page,
            per_page: i64::from(per_page.max(1)),
            total: total.max(0),
        };
        if page < 1 || (page > 1 && page > pagination.pages()) {
            return Err(AppError::not_found());
        }
        Ok(pagination)
    }

    /// Number of pages; zero for an empty collection.
    pub fn pages(&self) -> i64 {
        (self.total + self.per_page - 1) / self.per_page
    }

    /// The page `last` links point to.
    pub fn last_page(&self) -> i64 {
        self.pages().max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn prev_page(&self) -> Option<i64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<i64> {
        (self.page < self.pages()).then(|| self.page + 1)
    }
}
