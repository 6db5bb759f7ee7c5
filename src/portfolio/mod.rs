//! Dashboard display layer.
//!
//! Pure transforms from the typed API models to what the CLI renders.
//! Formatting always starts from the raw integer balance; a formatted
//! string is never fed back into the formatter.

pub mod format;
pub mod view;

pub use format::{format_units, truncate_address};
