//! Page window arithmetic.

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported page size {0}, expected one of {sizes:?}", sizes = PAGE_SIZES)]
pub struct PageSizeError(pub usize);

/// A page size from the fixed set in [`PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self, PageSizeError> {
        if PAGE_SIZES.contains(&size) {
            Ok(Self(size))
        } else {
            Err(PageSizeError(size))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Next larger allowed size, saturating at the largest
    pub fn larger(&self) -> Self {
        let index = PAGE_SIZES.iter().position(|size| *size == self.0).unwrap_or(0);
        Self(PAGE_SIZES[(index + 1).min(PAGE_SIZES.len() - 1)])
    }

    /// Next smaller allowed size, saturating at the smallest
    pub fn smaller(&self) -> Self {
        let index = PAGE_SIZES.iter().position(|size| *size == self.0).unwrap_or(0);
        Self(PAGE_SIZES[index.saturating_sub(1)])
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    page: usize,
    page_size: PageSize,
}

impl PageWindow {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Move to `page`. Values below 1 are ignored; returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Change the page size; always returns to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

/// `ceil(count / page_size)`, which is 0 for an empty collection.
pub fn total_pages(count: u64, page_size: PageSize) -> usize {
    let size = page_size.get() as u64;
    count.div_ceil(size) as usize
}

/// What the pagination control shows and which buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStatus {
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageStatus {
    pub fn new(window: &PageWindow, count: u64) -> Self {
        let total_pages = total_pages(count, window.page_size());
        Self {
            page: window.page(),
            total_pages,
            has_prev: window.page() > 1,
            has_next: total_pages > 0 && window.page() < total_pages,
        }
    }

    /// "Page 1 of 3"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
