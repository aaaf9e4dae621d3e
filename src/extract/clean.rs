//! Post-parse cleaning
//!
//! Runs after extraction and before export: normalizes whitespace in every
//! field, strips facilitator instructions that leak into question text, and
//! drops rows that became exact duplicates.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::normalize_whitespace;

use super::records::ExtractedRecord;

static INSTRUCTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)ASK participants:\s*",
        r"(?i)DISPLAY the question below on the PowerPoint Presentation\.\s*",
        r"(?i)MULTIPLE CHOICE QUESTIONS\s*",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Remove instructional phrases and extra whitespace from question text
pub fn clean_question_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in INSTRUCTION_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    normalize_whitespace(&cleaned)
}

fn clean_record(mut record: ExtractedRecord) -> ExtractedRecord {
    record.question = clean_question_text(&record.question);
    for field in [
        &mut record.answer,
        &mut record.marks,
        &mut record.chapter,
        &mut record.process,
        &mut record.subsection,
        &mut record.chapter_style,
        &mut record.process_style,
        &mut record.subsection_style,
    ] {
        *field = normalize_whitespace(field);
    }
    record
}

/// Clean every record and drop exact duplicates, keeping the first
pub fn clean_records(records: Vec<ExtractedRecord>) -> Vec<ExtractedRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(clean_record)
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::qa::{QaPair, QuestionType};
    use crate::extract::structure::StructureContext;

    fn record(question: &str, answer: &str) -> ExtractedRecord {
        ExtractedRecord::new(
            QaPair {
                question_type: QuestionType::Unknown,
                question: question.to_string(),
                answer: answer.to_string(),
            },
            &StructureContext::new("Chapter  1", "Process A ", ""),
        )
    }

    #[test]
    fn test_instructional_phrases_are_removed() {
        assert_eq!(
            clean_question_text("DISPLAY the question below on the PowerPoint Presentation. Which system?"),
            "Which system?"
        );
        assert_eq!(
            clean_question_text("multiple choice questions ask PARTICIPANTS:  Pick one"),
            "Pick one"
        );
        assert_eq!(clean_question_text("What is\nautomation?"), "What is automation?");
    }

    #[test]
    fn test_records_are_normalized_and_deduplicated() {
        let cleaned = clean_records(vec![
            record("ASK participants: Same?", "Yes"),
            record("Same?", " Yes "),
            record("Other?", "No"),
        ]);

        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].question, "Same?");
        assert_eq!(cleaned[0].chapter, "Chapter 1");
        assert_eq!(cleaned[0].process, "Process A");
        assert_eq!(cleaned[1].question, "Other?");
    }
}
