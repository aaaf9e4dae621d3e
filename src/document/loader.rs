//! Document loading and orchestration
//!
//! This module contains `load_document()`, which validates a .docx file,
//! reads it, and converts the docx-rs tree into a `SourceDocument`: the
//! body's top-level paragraphs and tables, in document order, with every
//! paragraph's style id resolved to its display name.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

// Import types from the models module
use super::models::*;
// Import I/O functions
use super::io::validate_docx_file;
// Import text extraction
use super::parsing::formatting::extract_paragraph_text;
// Import style resolution
use super::parsing::styles::StyleSheet;
// Import table extraction
use super::parsing::table::extract_table_data;

/// Validate and load a .docx file from disk
pub async fn load_document(
    file_path: &Path,
    options: &LoadOptions,
) -> Result<SourceDocument, LoadError> {
    let file_data = read_document_bytes(file_path).await?;
    parse_docx_bytes(&file_data, file_path, options)
}

/// Validate a .docx file and read its raw bytes
pub(crate) async fn read_document_bytes(file_path: &Path) -> Result<Vec<u8>, LoadError> {
    // Validate file type before attempting to parse
    validate_docx_file(file_path)?;

    tokio::fs::read(file_path)
        .await
        .map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })
}

/// Parse an in-memory .docx package.
///
/// `file_path` only labels the result and any error; nothing is read from it.
pub fn parse_docx_bytes(
    file_data: &[u8],
    file_path: &Path,
    options: &LoadOptions,
) -> Result<SourceDocument, LoadError> {
    let docx = docx_rs::read_docx(file_data).map_err(|e| LoadError::Parse {
        path: file_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let title = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Document")
        .to_string();

    let styles = StyleSheet::from_docx(&docx, &options.default_paragraph_style);

    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();

    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                paragraphs.push(StyledParagraph {
                    text: extract_paragraph_text(para),
                    style_name: styles.paragraph_style_name(para),
                });
            }
            docx_rs::DocumentChild::Table(table) => {
                tables.push(extract_table_data(table, &styles));
            }
            _ => {
                // Section properties, bookmarks and content controls carry no Q&A
            }
        }
    }

    let word_count = count_words(&paragraphs, &tables);

    debug!(
        "Loaded {}: {} paragraphs, {} tables, {} words",
        file_path.display(),
        paragraphs.len(),
        tables.len(),
        word_count
    );

    let metadata = DocumentMetadata {
        file_path: file_path.to_string_lossy().to_string(),
        file_size: file_data.len() as u64,
        word_count,
    };

    Ok(SourceDocument {
        title,
        metadata,
        paragraphs,
        tables,
    })
}

fn count_words(paragraphs: &[StyledParagraph], tables: &[SourceTable]) -> usize {
    let body: usize = paragraphs
        .iter()
        .map(|para| para.text.split_whitespace().count())
        .sum();
    let cells: usize = tables
        .iter()
        .flat_map(|table| table.cells())
        .flat_map(|cell| cell.paragraphs.iter())
        .map(|para| para.text.split_whitespace().count())
        .sum();
    body + cells
}
