//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
///
/// Values are taken as given: no upper bound is applied to `size`, and the
/// offset is computed in 64 bits so that large page numbers do not wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: u32,
    /// The number of items per page.
    pub size: u32,
}

impl PageRequest {
    /// Creates a new page request.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Builds a page request from optional parts.
    ///
    /// Pagination is only enabled when both `page` and `size` are present;
    /// otherwise `None` is returned and the caller gets the full result set.
    #[must_use]
    pub const fn from_parts(page: Option<u32>, size: Option<u32>) -> Option<Self> {
        match (page, size) {
            (Some(page), Some(size)) => Some(Self::new(page, size)),
            _ => None,
        }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.size
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The current page number (0-indexed).
    pub page: u32,
    /// The number of items per page.
    pub size: u32,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
    /// The number of items on this page.
    pub number_of_elements: usize,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(page: u32, size: u32, total_elements: u64, number_of_elements: usize) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(u64::from(size))
        } else {
            0
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: u64::from(page) >= total_pages.saturating_sub(1),
            number_of_elements,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let number_of_elements = content.len();
        Self {
            content,
            info: PageInfo::new(page, size, total_elements, number_of_elements),
        }
    }

    /// Wraps a complete, unpaginated result set as a single page.
    #[must_use]
    pub fn unpaged(content: Vec<T>) -> Self {
        let size = u32::try_from(content.len()).unwrap_or(u32::MAX);
        let total = content.len() as u64;
        Self::new(content, 0, size, total)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            info: self.info,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.info.total_elements
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.info.total_pages
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.info.last
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        !self.info.first
    }
}
