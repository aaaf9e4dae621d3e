//! Question/answer pattern extraction
//!
//! Facilitator guides mark assessable units inside table cells with two
//! instructional labels, `ASK participants:` before the question and
//! `ANSWER:` before the answer. A cell is read in one of two modes:
//!
//! * single-pair: the whole cell text holds at most one question label.
//!   Both sides must be present and non-empty or the cell yields nothing.
//! * multi-paragraph: the cell holds several question labels, each
//!   paragraph a potential unit of its own. The answer may sit in the same
//!   paragraph or lead the next one, and a question with no answer is still
//!   emitted with an empty answer.
//!
//! The two modes intentionally disagree on incomplete units. Single-pair
//! drops them; multi-paragraph keeps them. Unifying the two is an open
//! product question, so both behaviors are kept and tested as they are.
//!
//! The labels match case-sensitively. The concept-check tokens that
//! classify a question match case-insensitively.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::parsing::heading::style_in;
use crate::document::{normalize_whitespace, SourceCell, StyledParagraph};

/// Label strings and style filters used by the extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub question: String,
    pub answer: String,
    pub concept_check: String,
    pub challenge: String,
    /// Styles on which a paragraph may raise the concept-check flag
    pub content_styles: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            question: "ASK participants:".to_string(),
            answer: "ANSWER:".to_string(),
            concept_check: "concept check".to_string(),
            challenge: "challenges concept check".to_string(),
            content_styles: vec!["Normal".to_string(), "Body Text".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "CONCEPT CHECK")]
    ConceptCheck,
    #[serde(rename = "Challenges Concept Check Question")]
    ChallengesConceptCheck,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Unknown => "Unknown",
            QuestionType::ConceptCheck => "CONCEPT CHECK",
            QuestionType::ChallengesConceptCheck => "Challenges Concept Check Question",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted unit, before structural context is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaPair {
    pub question_type: QuestionType,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default)]
pub struct QaExtractor {
    markers: MarkerConfig,
}

impl QaExtractor {
    pub fn new(markers: MarkerConfig) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    /// Extract every unit from a table cell.
    ///
    /// A cell with two or more question labels is read paragraph by
    /// paragraph; anything else goes through the single-pair pattern.
    pub fn extract_cell(&self, cell: &SourceCell) -> Vec<QaPair> {
        let text = cell.text();
        if self.question_marker_count(&text) > 1 {
            self.extract_paragraphs(&cell.paragraphs)
        } else {
            self.extract_single_pair(&text).into_iter().collect()
        }
    }

    /// Single-pair pattern over the full cell text.
    ///
    /// The question is everything between the question label and the first
    /// answer label after it; the answer is everything after that. Returns
    /// `None` unless both are non-empty once trimmed.
    pub fn extract_single_pair(&self, cell_text: &str) -> Option<QaPair> {
        let question_marker = self.markers.question.as_str();
        let answer_marker = self.markers.answer.as_str();
        if question_marker.is_empty() || answer_marker.is_empty() {
            return None;
        }

        let (_, after_question) = cell_text.split_once(question_marker)?;
        let Some((raw_question, raw_answer)) = after_question.split_once(answer_marker) else {
            debug!("Question label without a following answer label, skipping cell");
            return None;
        };

        let question = raw_question.trim();
        let answer = raw_answer.trim();
        if question.is_empty() || answer.is_empty() {
            debug!(
                "Incomplete question/answer pair skipped (question: {:?}, answer: {:?})",
                question, answer
            );
            return None;
        }

        Some(QaPair {
            question_type: self.classify_cell(cell_text),
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }

    /// Multi-paragraph pattern.
    ///
    /// Unlike `extract_single_pair`, a question whose answer cannot be found
    /// is emitted with an empty answer.
    pub fn extract_paragraphs(&self, paragraphs: &[StyledParagraph]) -> Vec<QaPair> {
        let question_marker = self.markers.question.as_str();
        let answer_marker = self.markers.answer.as_str();
        if question_marker.is_empty() || answer_marker.is_empty() {
            return Vec::new();
        }

        let mut pairs = Vec::new();
        let mut last_concept_check = QuestionType::Unknown;

        for (idx, paragraph) in paragraphs.iter().enumerate() {
            let text = normalize_whitespace(&paragraph.text);

            if self.is_content_paragraph(paragraph)
                && contains_ignore_case(&text, &self.markers.concept_check)
            {
                last_concept_check = self.classify_concept_check(&text);
            }

            let Some((_, after_question)) = text.split_once(question_marker) else {
                continue;
            };

            let (question, answer) = match after_question.split_once(answer_marker) {
                Some((question, answer)) => (question.trim(), answer.trim().to_string()),
                None => {
                    // Look ahead exactly one paragraph for a leading answer label
                    let answer = paragraphs
                        .get(idx + 1)
                        .map(|next| normalize_whitespace(&next.text))
                        .and_then(|next| {
                            next.strip_prefix(answer_marker)
                                .map(|rest| rest.trim().to_string())
                        })
                        .unwrap_or_default();
                    (after_question.trim(), answer)
                }
            };

            pairs.push(QaPair {
                question_type: last_concept_check,
                question: question.to_string(),
                answer,
            });
        }

        pairs
    }

    fn question_marker_count(&self, text: &str) -> usize {
        if self.markers.question.is_empty() {
            return 0;
        }
        text.matches(self.markers.question.as_str()).count()
    }

    /// Headings inside a cell are structure, not content
    fn is_content_paragraph(&self, paragraph: &StyledParagraph) -> bool {
        paragraph
            .style_name
            .as_deref()
            .is_some_and(|style| style_in(style, &self.markers.content_styles))
    }

    /// Single-pair classification: only the challenge token distinguishes a cell
    fn classify_cell(&self, cell_text: &str) -> QuestionType {
        if contains_ignore_case(cell_text, &self.markers.challenge) {
            QuestionType::ChallengesConceptCheck
        } else {
            QuestionType::Unknown
        }
    }

    fn classify_concept_check(&self, text: &str) -> QuestionType {
        if contains_ignore_case(text, &self.markers.challenge) {
            QuestionType::ChallengesConceptCheck
        } else {
            QuestionType::ConceptCheck
        }
    }
}

fn contains_ignore_case(text: &str, token: &str) -> bool {
    !token.is_empty() && text.to_lowercase().contains(&token.to_lowercase())
}
