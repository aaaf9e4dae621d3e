//! Table extraction
//!
//! This module converts docx-rs tables into `SourceTable`s. Each cell keeps
//! its own ordered, styled paragraph sequence because headings may appear
//! inside cells and multi-paragraph cells carry several Q&A units.

use tracing::debug;

use super::super::models::*;
use super::formatting::extract_paragraph_text;
use super::styles::StyleSheet;

/// Extract table data from a docx-rs Table
pub(crate) fn extract_table_data(table: &docx_rs::Table, styles: &StyleSheet) -> SourceTable {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            row_cells.push(extract_cell(cell, styles));
        }

        rows.push(row_cells);
    }

    SourceTable::new(rows)
}

fn extract_cell(cell: &docx_rs::TableCell, styles: &StyleSheet) -> SourceCell {
    let mut paragraphs = Vec::new();

    for content in &cell.children {
        match content {
            docx_rs::TableCellContent::Paragraph(para) => {
                paragraphs.push(StyledParagraph {
                    text: extract_paragraph_text(para),
                    style_name: styles.paragraph_style_name(para),
                });
            }
            docx_rs::TableCellContent::Table(_) => {
                debug!("Skipping nested table inside a cell");
            }
            _ => {}
        }
    }

    SourceCell::new(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_keep_styled_paragraphs_in_order() {
        let table = docx_rs::Table::new(vec![docx_rs::TableRow::new(vec![
            docx_rs::TableCell::new()
                .add_paragraph(
                    docx_rs::Paragraph::new()
                        .add_run(docx_rs::Run::new().add_text("Process B"))
                        .style("Heading2"),
                )
                .add_paragraph(
                    docx_rs::Paragraph::new()
                        .add_run(docx_rs::Run::new().add_text("ASK participants: Why?")),
                ),
            docx_rs::TableCell::new().add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("ANSWER: Because")),
            ),
        ])]);

        let docx = docx_rs::Docx::new()
            .add_style(docx_rs::Style::new("Heading2", docx_rs::StyleType::Paragraph).name("Heading 2"));
        let styles = StyleSheet::from_docx(&docx, "Normal");
        let source = extract_table_data(&table, &styles);

        assert_eq!(source.rows.len(), 1);
        assert_eq!(source.rows[0].len(), 2);

        let first = &source.rows[0][0];
        assert_eq!(first.paragraphs.len(), 2);
        assert_eq!(first.paragraphs[0].style_name.as_deref(), Some("Heading 2"));
        assert_eq!(first.paragraphs[1].style_name.as_deref(), Some("Normal"));
        assert_eq!(first.text(), "Process B\nASK participants: Why?");
        assert_eq!(source.rows[0][1].text(), "ANSWER: Because");
    }
}
