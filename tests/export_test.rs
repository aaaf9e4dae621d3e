use std::path::Path;

use assessment_extractor::document::LoadOptions;
use assessment_extractor::export::{export_records, write_export};
use assessment_extractor::extract::{
    ExtractedRecord, QaPair, QuestionType, RecordTable, StructureContext,
};
use assessment_extractor::{parse_docx_bytes, ExportFormat};

fn record(question_type: QuestionType, question: &str, answer: &str) -> ExtractedRecord {
    let mut context = StructureContext::new("Chapter 1", "Process A", "Step 1");
    context.chapter_style = "heading 1".to_string();
    context.process_style = "heading 2".to_string();
    context.subsection_style = "heading 3".to_string();

    ExtractedRecord::new(
        QaPair {
            question_type,
            question: question.to_string(),
            answer: answer.to_string(),
        },
        &context,
    )
}

fn sample_table() -> RecordTable {
    RecordTable::new(
        "Week 1",
        vec![
            record(QuestionType::ConceptCheck, "What is 2 + 2?", "4"),
            record(
                QuestionType::ChallengesConceptCheck,
                "Name two, with commas",
                "first line\nsecond line",
            ),
        ],
    )
}

fn render(table: &RecordTable, format: ExportFormat) -> String {
    String::from_utf8(export_records(table, &format).unwrap()).unwrap()
}

#[test]
fn test_csv_layout() {
    let csv = render(&sample_table(), ExportFormat::Csv);
    let mut lines = csv.split("\r\n");

    assert_eq!(
        lines.next().unwrap(),
        "QuestionType,Questions,Answer,Marks,Chapter,Process,Subsection"
    );
    assert_eq!(
        lines.next().unwrap(),
        "CONCEPT CHECK,What is 2 + 2?,4,/1,Chapter 1,Process A,Step 1"
    );
    assert!(csv.contains(
        "Challenges Concept Check Question,\"Name two, with commas\",\"first line\nsecond line\",/1"
    ));
    assert!(csv.ends_with("\r\n"));
}

#[test]
fn test_csv_style_columns_are_opt_in() {
    let table = sample_table().with_style_columns(true);
    let csv = render(&table, ExportFormat::Csv);
    let header = csv.split("\r\n").next().unwrap();

    assert!(header.ends_with("Subsection,ChapterStyle,ProcessStyle,SubsectionStyle"));
    assert!(csv.contains("Step 1,heading 1,heading 2,heading 3"));
}

#[test]
fn test_json_rows_use_column_names() {
    let json = render(&sample_table(), ExportFormat::Json);
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["QuestionType"], "CONCEPT CHECK");
    assert_eq!(rows[0]["Questions"], "What is 2 + 2?");
    assert_eq!(rows[0]["Marks"], "/1");
    assert_eq!(rows[1]["Answer"], "first line\nsecond line");
    assert!(rows[0].get("ChapterStyle").is_none());

    let with_styles = render(&sample_table().with_style_columns(true), ExportFormat::Json);
    let rows: serde_json::Value = serde_json::from_str(&with_styles).unwrap();
    assert_eq!(rows[0]["SubsectionStyle"], "heading 3");
}

#[test]
fn test_markdown_table() {
    let markdown = render(&sample_table(), ExportFormat::Markdown);
    let lines: Vec<&str> = markdown.lines().collect();

    assert_eq!(lines[0], "# Week 1");
    assert!(lines[2].starts_with("| QuestionType"));
    assert!(lines[3].starts_with("| ---"));
    assert!(markdown.contains("first line<br>second line"));
    // Header, separator and one line per record
    assert_eq!(lines.iter().filter(|line| line.starts_with('|')).count(), 4);
}

#[test]
fn test_docx_export_reads_back() {
    let bytes = export_records(&sample_table(), &ExportFormat::Docx).unwrap();
    let doc = parse_docx_bytes(&bytes, Path::new("Week 1.docx"), &LoadOptions::default())
        .unwrap();

    assert_eq!(doc.paragraphs[0].text, "Week 1");
    assert_eq!(doc.paragraphs[0].style_name.as_deref(), Some("Heading 1"));
    assert_eq!(doc.tables.len(), 1);

    let rows = &doc.tables[0].rows;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 7);
    assert_eq!(rows[0][0].text(), "QuestionType");
    assert_eq!(rows[1][1].text(), "What is 2 + 2?");
    assert_eq!(rows[2][2].text(), "first line\nsecond line");
}

#[test]
fn test_write_export_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("nested").join("week1.csv");

    write_export(&sample_table(), &ExportFormat::Csv, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("QuestionType,Questions"));
}

#[test]
fn test_empty_table_still_has_headers() {
    let table = RecordTable::new("Empty", Vec::new());
    assert_eq!(
        render(&table, ExportFormat::Csv),
        "QuestionType,Questions,Answer,Marks,Chapter,Process,Subsection\r\n"
    );
    assert_eq!(render(&table, ExportFormat::Json).trim(), "[]");
}

#[test]
fn test_extensions() {
    assert_eq!(ExportFormat::Csv.extension(), "csv");
    assert_eq!(ExportFormat::Json.extension(), "json");
    assert_eq!(ExportFormat::Markdown.extension(), "md");
    assert_eq!(ExportFormat::Docx.extension(), "docx");
}
