//! Extracted records and the tabular result container

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::qa::{QaPair, QuestionType};
use super::structure::StructureContext;

/// Marks awarded per question
pub const MARKS: &str = "/1";

/// Fixed result columns, in export order
pub const COLUMNS: [&str; 7] = [
    "QuestionType",
    "Questions",
    "Answer",
    "Marks",
    "Chapter",
    "Process",
    "Subsection",
];

/// Optional audit columns naming the style that set each context field
pub const STYLE_COLUMNS: [&str; 3] = ["ChapterStyle", "ProcessStyle", "SubsectionStyle"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "QuestionType")]
    pub question_type: QuestionType,
    #[serde(rename = "Questions")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "Marks")]
    pub marks: String,
    #[serde(rename = "Chapter")]
    pub chapter: String,
    #[serde(rename = "Process")]
    pub process: String,
    #[serde(rename = "Subsection")]
    pub subsection: String,
    #[serde(rename = "ChapterStyle")]
    pub chapter_style: String,
    #[serde(rename = "ProcessStyle")]
    pub process_style: String,
    #[serde(rename = "SubsectionStyle")]
    pub subsection_style: String,
}

impl ExtractedRecord {
    /// Stamp a pair with a snapshot of the context it was found in
    pub fn new(pair: QaPair, context: &StructureContext) -> Self {
        Self {
            question_type: pair.question_type,
            question: pair.question,
            answer: pair.answer,
            marks: MARKS.to_string(),
            chapter: context.chapter.clone(),
            process: context.process.clone(),
            subsection: context.subsection.clone(),
            chapter_style: context.chapter_style.clone(),
            process_style: context.process_style.clone(),
            subsection_style: context.subsection_style.clone(),
        }
    }

    /// Field values in `COLUMNS` order, then `STYLE_COLUMNS` if requested
    pub fn values(&self, include_styles: bool) -> Vec<String> {
        let mut values = vec![
            self.question_type.to_string(),
            self.question.clone(),
            self.answer.clone(),
            self.marks.clone(),
            self.chapter.clone(),
            self.process.clone(),
            self.subsection.clone(),
        ];
        if include_styles {
            values.extend([
                self.chapter_style.clone(),
                self.process_style.clone(),
                self.subsection_style.clone(),
            ]);
        }
        values
    }
}

/// Per-document set of normalized question strings already emitted
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `question`; false when it is empty or was seen before
    pub fn insert(&mut self, question: &str) -> bool {
        let key = normalize_question_key(question);
        if key.is_empty() {
            return false;
        }
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Lower-cased, trimmed question text
pub fn normalize_question_key(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Ordered records with a fixed column layout
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    pub title: String,
    pub records: Vec<ExtractedRecord>,
    pub include_styles: bool,
}

impl RecordTable {
    pub fn new(title: impl Into<String>, records: Vec<ExtractedRecord>) -> Self {
        Self {
            title: title.into(),
            records,
            include_styles: false,
        }
    }

    pub fn with_style_columns(mut self, include_styles: bool) -> Self {
        self.include_styles = include_styles;
        self
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = COLUMNS.to_vec();
        if self.include_styles {
            headers.extend(STYLE_COLUMNS);
        }
        headers
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| record.values(self.include_styles))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_normalizes_case_and_surrounding_space() {
        let mut seen = DedupSet::new();
        assert!(seen.insert("What is 2 + 2?"));
        assert!(!seen.insert("  what is 2 + 2?  "));
        assert!(seen.insert("What is 3 + 3?"));
        assert!(!seen.insert("   "));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_table_columns_follow_style_flag() {
        let pair = QaPair {
            question_type: QuestionType::Unknown,
            question: "Q?".to_string(),
            answer: "A".to_string(),
        };
        let context = StructureContext {
            chapter_style: "heading 1".to_string(),
            ..StructureContext::new("Chapter 1", "Process A", "")
        };
        let table = RecordTable::new("guide", vec![ExtractedRecord::new(pair, &context)]);

        assert_eq!(table.headers().len(), 7);
        assert_eq!(
            table.rows()[0],
            vec!["Unknown", "Q?", "A", "/1", "Chapter 1", "Process A", ""]
        );

        let table = table.with_style_columns(true);
        assert_eq!(table.headers()[7], "ChapterStyle");
        assert_eq!(table.rows()[0][7], "heading 1");
        assert_eq!(table.rows()[0].len(), 10);
    }
}
