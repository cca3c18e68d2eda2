//! Type definitions module
//!
//! - `pagination` - Pagination parameters and the paged result envelope

pub mod pagination;

// Re-export commonly used types at module level
pub use pagination::{Page, Pagination};
