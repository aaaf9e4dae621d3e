//! Document parsing and data structures module
//!
//! This module parses Microsoft Word (.docx) documents into the read-only
//! `SourceDocument` view the extraction engine walks.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub mod parsing;

// Re-export all models and the loading entry points
pub use io::has_docx_extension;
pub use loader::{load_document, parse_docx_bytes};
pub use models::*;
pub use parsing::formatting::normalize_whitespace;
pub use parsing::heading::{HeadingLevel, HeadingStyles};
