//! Core data structures for the document source
//!
//! This module defines the read-only view of a Word document that the
//! extraction engine walks: top-level styled paragraphs and tables whose
//! cells keep their own paragraph sequence.

use serde::{Deserialize, Serialize};

// Type aliases for convenience
pub type SourceRow = Vec<SourceCell>;

/// Options applied while turning a .docx package into a `SourceDocument`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Style name reported for paragraphs that carry no explicit style
    pub default_paragraph_style: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            default_paragraph_style: "Normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    pub title: String,
    pub metadata: DocumentMetadata,
    pub paragraphs: Vec<StyledParagraph>,
    pub tables: Vec<SourceTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub word_count: usize,
}

/// A paragraph's text together with the display name of its style.
///
/// `style_name` is `None` when the style reference could not be read; such
/// paragraphs never count as headings or content paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledParagraph {
    pub text: String,
    pub style_name: Option<String>,
}

impl StyledParagraph {
    pub fn new(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_name: Some(style_name.into()),
        }
    }

    pub fn unstyled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTable {
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(rows: Vec<SourceRow>) -> Self {
        Self { rows }
    }

    pub fn cells(&self) -> impl Iterator<Item = &SourceCell> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCell {
    pub paragraphs: Vec<StyledParagraph>,
}

impl SourceCell {
    pub fn new(paragraphs: Vec<StyledParagraph>) -> Self {
        Self { paragraphs }
    }

    /// Cell text with paragraphs separated by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|para| para.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SourceDocument {
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn cell_count(&self) -> usize {
        self.tables.iter().map(|table| table.cells().count()).sum()
    }
}
