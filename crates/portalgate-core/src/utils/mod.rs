//! Utility functions for dashboard text formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{first_name, format_long_date, greeting_for_hour, title_case, truncate_string};
