//! Pagination state for roster and attendance listings.
//!
//! # Invariants
//! - `current_page >= 1`.
//! - `items_per_page >= 1`.
//! - `reset` restores the values given at construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default page size for listings.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Rejected pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    ZeroPage,
    ZeroItemsPerPage,
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPage => write!(f, "page numbers start at 1"),
            Self::ZeroItemsPerPage => write!(f, "items per page must be at least 1"),
        }
    }
}

impl Error for PaginationError {}

/// Page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    items_per_page: u32,
    initial_page: u32,
    initial_items_per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            initial_page: 1,
            initial_items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(initial_page: u32, items_per_page: u32) -> Result<Self, PaginationError> {
        if initial_page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if items_per_page == 0 {
            return Err(PaginationError::ZeroItemsPerPage);
        }
        Ok(Self {
            current_page: initial_page,
            items_per_page,
            initial_page,
            initial_items_per_page: items_per_page,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Advances one page. There is no upper bound; callers clamp against
    /// [`Self::total_pages`] when they need one.
    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Goes back one page, never below page 1.
    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Jumps to `page`; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: u32) -> Result<(), PaginationError> {
        if items_per_page == 0 {
            return Err(PaginationError::ZeroItemsPerPage);
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Restores construction-time page and page size.
    pub fn reset(&mut self) {
        self.current_page = self.initial_page;
        self.items_per_page = self.initial_items_per_page;
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1).saturating_mul(self.items_per_page as usize)
    }

    /// Number of pages needed for `total_items`; at least 1.
    pub fn total_pages(&self, total_items: usize) -> u32 {
        let per_page = self.items_per_page as usize;
        let pages = total_items.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Items of `items` visible on the current page; empty past the end.
    pub fn page_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start
            .saturating_add(self.items_per_page as usize)
            .min(items.len());
        &items[start..end]
    }
}
