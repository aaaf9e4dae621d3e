//! Assessment extraction engine
//!
//! Structure tracking, the question/answer pattern engine, the traversal
//! driver that combines them, and the cleaning stage applied to its output.

pub mod clean;
pub mod driver;
pub mod qa;
pub mod records;
pub mod structure;

pub use clean::{clean_question_text, clean_records};
pub use driver::DocumentParser;
pub use qa::{MarkerConfig, QaExtractor, QaPair, QuestionType};
pub use records::{DedupSet, ExtractedRecord, RecordTable, COLUMNS, MARKS, STYLE_COLUMNS};
pub use structure::{StructureContext, StructureTracker};
