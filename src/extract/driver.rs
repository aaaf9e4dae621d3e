//! Document traversal
//!
//! The driver makes two passes that are never revisited. The first folds
//! the body's top-level paragraphs into the structural context. The second
//! walks tables, rows and cells in document order; each cell's own
//! paragraphs update the context before the cell is searched for Q&A, and
//! every new question is stamped with the context as it stands right then.

use tracing::{debug, info};

use crate::document::{HeadingStyles, SourceDocument};

use super::qa::{MarkerConfig, QaExtractor};
use super::records::{DedupSet, ExtractedRecord};
use super::structure::{StructureContext, StructureTracker};

#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    tracker: StructureTracker,
    extractor: QaExtractor,
}

impl DocumentParser {
    pub fn new(headings: HeadingStyles, markers: MarkerConfig) -> Self {
        Self {
            tracker: StructureTracker::new(headings),
            extractor: QaExtractor::new(markers),
        }
    }

    pub fn tracker(&self) -> &StructureTracker {
        &self.tracker
    }

    pub fn extractor(&self) -> &QaExtractor {
        &self.extractor
    }

    /// Extract all unique Q&A records from one document, in document order
    pub fn parse(&self, document: &SourceDocument) -> Vec<ExtractedRecord> {
        let mut context = self
            .tracker
            .replay(StructureContext::default(), &document.paragraphs);

        debug!(
            "Context after body paragraphs: chapter={:?} process={:?} subsection={:?}",
            context.chapter, context.process, context.subsection
        );

        let mut seen = DedupSet::new();
        let mut records = Vec::new();
        let mut duplicates = 0usize;

        for (table_idx, table) in document.tables.iter().enumerate() {
            for (row_idx, row) in table.rows.iter().enumerate() {
                for (cell_idx, cell) in row.iter().enumerate() {
                    // Headings can live inside cells
                    context = self.tracker.replay(context, &cell.paragraphs);

                    for pair in self.extractor.extract_cell(cell) {
                        if !seen.insert(&pair.question) {
                            duplicates += 1;
                            continue;
                        }
                        debug!(
                            "Added Q&A from table[{}] row[{}] cell[{}]: {:?}",
                            table_idx, row_idx, cell_idx, pair.question
                        );
                        records.push(ExtractedRecord::new(pair, &context));
                    }
                }
            }
        }

        info!(
            "Extracted {} unique Q&A pairs from {} ({} repeats suppressed)",
            records.len(),
            document.title,
            duplicates
        );

        records
    }
}
