//! Envelope types used across endpoints

use serde::{Deserialize, Serialize};

/// Pagination metadata returned alongside list pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// A single page of a paginated list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Whether another page follows this one
    pub fn has_next_page(&self) -> bool {
        self.meta.current_page < self.meta.last_page
    }

    /// Page number to request next, if any
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.meta.current_page + 1)
    }
}

/// Plain acknowledgement body (`{"message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
