//! Shared utility functions.
//!
//! - `text`: whitespace and markup normalization for extracted text

mod text;

pub use text::normalize;
