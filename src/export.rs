//! Export of extracted records
//!
//! Renders a `RecordTable` as CSV, JSON, a Markdown pipe table, or a Word
//! document holding a single results table.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::extract::RecordTable;
use crate::ExportFormat;

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
        }
    }
}

/// Render `table` in the requested format
pub fn export_records(table: &RecordTable, format: &ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => Ok(export_to_csv(table).into_bytes()),
        ExportFormat::Json => Ok(export_to_json(table)?.into_bytes()),
        ExportFormat::Markdown => Ok(export_to_markdown(table).into_bytes()),
        ExportFormat::Docx => export_to_docx(table),
    }
}

/// Render and write `table` to `path`, creating parent directories
pub fn write_export(table: &RecordTable, format: &ExportFormat, path: &Path) -> Result<()> {
    let bytes = export_records(table, format)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn export_to_csv(table: &RecordTable) -> String {
    let mut output = String::new();

    push_csv_line(&mut output, table.headers().iter().copied());
    for row in table.rows() {
        push_csv_line(&mut output, row.iter().map(String::as_str));
    }

    output
}

fn push_csv_line<'a>(output: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line = fields.map(escape_csv_field).collect::<Vec<_>>().join(",");
    output.push_str(&line);
    output.push_str("\r\n");
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "QuestionType")]
    question_type: String,
    #[serde(rename = "Questions")]
    question: &'a str,
    #[serde(rename = "Answer")]
    answer: &'a str,
    #[serde(rename = "Marks")]
    marks: &'a str,
    #[serde(rename = "Chapter")]
    chapter: &'a str,
    #[serde(rename = "Process")]
    process: &'a str,
    #[serde(rename = "Subsection")]
    subsection: &'a str,
    #[serde(rename = "ChapterStyle", skip_serializing_if = "Option::is_none")]
    chapter_style: Option<&'a str>,
    #[serde(rename = "ProcessStyle", skip_serializing_if = "Option::is_none")]
    process_style: Option<&'a str>,
    #[serde(rename = "SubsectionStyle", skip_serializing_if = "Option::is_none")]
    subsection_style: Option<&'a str>,
}

pub fn export_to_json(table: &RecordTable) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = table
        .records
        .iter()
        .map(|record| JsonRow {
            question_type: record.question_type.to_string(),
            question: &record.question,
            answer: &record.answer,
            marks: &record.marks,
            chapter: &record.chapter,
            process: &record.process,
            subsection: &record.subsection,
            chapter_style: audit_value(&record.chapter_style, table.include_styles),
            process_style: audit_value(&record.process_style, table.include_styles),
            subsection_style: audit_value(&record.subsection_style, table.include_styles),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

fn audit_value(value: &str, include: bool) -> Option<&str> {
    include.then_some(value)
}

pub fn export_to_markdown(table: &RecordTable) -> String {
    let headers: Vec<String> = table.headers().iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|value| escape_markdown_cell(value)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(value));
        }
    }
    // Ensure minimum width of 3 characters per column
    widths.iter_mut().for_each(|w| *w = (*w).max(3));

    let mut output = String::new();
    if !table.title.is_empty() {
        output.push_str(&format!("# {}\n\n", table.title));
    }

    push_markdown_row(&mut output, &headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_markdown_row(&mut output, &separator, &widths);
    for row in &rows {
        push_markdown_row(&mut output, row, &widths);
    }

    output
}

fn push_markdown_row(output: &mut String, cells: &[String], widths: &[usize]) {
    output.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(display_width(cell));
        output.push(' ');
        output.push_str(cell);
        output.push_str(&" ".repeat(padding));
        output.push_str(" |");
    }
    output.push('\n');
}

fn escape_markdown_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Build a Word document with the title as a heading and one results table
pub fn export_to_docx(table: &RecordTable) -> Result<Vec<u8>> {
    let header_row = TableRow::new(
        table
            .headers()
            .iter()
            .map(|header| {
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*header).bold()))
            })
            .collect(),
    );

    let mut rows = vec![header_row];
    for row in table.rows() {
        rows.push(TableRow::new(
            row.iter()
                .map(|value| TableCell::new().add_paragraph(docx_cell_paragraph(value)))
                .collect(),
        ));
    }

    let docx = Docx::new()
        .add_style(Style::new("Heading1", StyleType::Paragraph).name("Heading 1"))
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(table.title.as_str()))
                .style("Heading1"),
        )
        .add_table(Table::new(rows));

    let mut buffer = Vec::new();
    docx.build()
        .pack(Cursor::new(&mut buffer))
        .context("packing .docx export")?;
    Ok(buffer)
}

/// One paragraph per cell value, with line breaks kept as Word breaks
fn docx_cell_paragraph(value: &str) -> Paragraph {
    let mut run = Run::new();
    for (idx, line) in value.lines().enumerate() {
        if idx > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a, b"), "\"a, b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_markdown_cell_escaping() {
        assert_eq!(escape_markdown_cell("a | b"), "a \\| b");
        assert_eq!(escape_markdown_cell("one\ntwo"), "one<br>two");
    }

    #[test]
    fn test_display_width_counts_graphemes() {
        assert_eq!(display_width("cafe\u{301}"), 4);
        assert_eq!(display_width("abc"), 3);
    }
}
