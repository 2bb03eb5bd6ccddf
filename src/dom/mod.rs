//! In-memory page document.
//!
//! The widgets only need a small host surface: lookup by id, class list
//! edits, and text content assignment.

pub mod document;
pub mod element;

pub use document::Document;
pub use element::{ClassList, Element};
