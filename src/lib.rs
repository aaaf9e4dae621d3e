//! assessment-extractor: pulls assessment questions out of .docx facilitator guides
//!
//! This library walks a Word document's heading hierarchy
//! (chapter/process/subsection), finds table cells written in the
//! `ASK participants: ... ANSWER: ...` pattern, and returns deduplicated
//! question/answer records stamped with their structural context, ready
//! for export as a table.

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod summary;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
    Docx,
}

// Re-export commonly used types
pub use config::Config;
pub use document::{load_document, parse_docx_bytes, SourceDocument};
pub use error::LoadError;
pub use extract::{DocumentParser, ExtractedRecord, QuestionType, RecordTable};
pub use summary::AssessmentSummary;
