//! Assessment breakdown
//!
//! Counts chapters, processes, subsections and question types across a set
//! of records and reports them per chapter. Groups keep first-appearance
//! order; empty structure names are not counted as distinct entries.

use std::fmt;

use tracing::info;

use crate::extract::{ExtractedRecord, QuestionType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub questions: usize,
    pub answers: usize,
}

impl Tally {
    fn add(&mut self, record: &ExtractedRecord) {
        if !record.question.is_empty() {
            self.questions += 1;
        }
        if !record.answer.is_empty() {
            self.answers += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsectionSummary {
    pub name: String,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub name: String,
    pub subsections: Vec<SubsectionSummary>,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSummary {
    pub name: String,
    pub processes: Vec<ProcessSummary>,
    pub question_types: Vec<(QuestionType, usize)>,
    pub tally: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentSummary {
    pub chapters: Vec<ChapterSummary>,
    pub total_chapters: usize,
    pub total_processes: usize,
    pub total_subsections: usize,
    pub question_types: Vec<QuestionType>,
    pub tally: Tally,
    pub unique_questions: usize,
    pub unique_answers: usize,
}

/// Position of `name` in `items`, appending a new entry if absent
fn slot<T>(items: &mut Vec<T>, name: &str, key: impl Fn(&T) -> &str, make: impl FnOnce() -> T) -> usize {
    if let Some(index) = items.iter().position(|item| key(item) == name) {
        index
    } else {
        items.push(make());
        items.len() - 1
    }
}

impl AssessmentSummary {
    pub fn from_records(records: &[ExtractedRecord]) -> Self {
        let mut summary = AssessmentSummary::default();
        let mut unique_questions = std::collections::HashSet::new();
        let mut unique_answers = std::collections::HashSet::new();

        for record in records {
            summary.tally.add(record);
            unique_questions.insert(record.question.as_str());
            unique_answers.insert(record.answer.as_str());

            if !summary.question_types.contains(&record.question_type) {
                summary.question_types.push(record.question_type);
            }

            let chapter_idx = slot(&mut summary.chapters, &record.chapter, |c| c.name.as_str(), || {
                ChapterSummary {
                    name: record.chapter.clone(),
                    processes: Vec::new(),
                    question_types: Vec::new(),
                    tally: Tally::default(),
                }
            });
            let chapter = &mut summary.chapters[chapter_idx];
            chapter.tally.add(record);

            match chapter
                .question_types
                .iter_mut()
                .find(|(question_type, _)| *question_type == record.question_type)
            {
                Some((_, count)) => *count += 1,
                None => chapter.question_types.push((record.question_type, 1)),
            }

            let process_idx = slot(&mut chapter.processes, &record.process, |p| p.name.as_str(), || {
                ProcessSummary {
                    name: record.process.clone(),
                    subsections: Vec::new(),
                    tally: Tally::default(),
                }
            });
            let process = &mut chapter.processes[process_idx];
            process.tally.add(record);

            let subsection_idx = slot(&mut process.subsections, &record.subsection, |s| s.name.as_str(), || {
                SubsectionSummary {
                    name: record.subsection.clone(),
                    tally: Tally::default(),
                }
            });
            process.subsections[subsection_idx].tally.add(record);
        }

        summary.total_chapters = summary
            .chapters
            .iter()
            .filter(|chapter| !chapter.name.is_empty())
            .count();
        summary.total_processes = summary
            .chapters
            .iter()
            .flat_map(|chapter| &chapter.processes)
            .filter(|process| !process.name.is_empty())
            .count();
        summary.total_subsections = summary
            .chapters
            .iter()
            .flat_map(|chapter| &chapter.processes)
            .flat_map(|process| &process.subsections)
            .filter(|subsection| !subsection.name.is_empty())
            .count();
        summary.unique_questions = unique_questions.len();
        summary.unique_answers = unique_answers.len();

        summary
    }

    /// Emit the breakdown as log events
    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{}", line);
        }
    }
}

impl fmt::Display for AssessmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary breakdown:")?;
        writeln!(f, "Total chapters: {}", self.total_chapters)?;
        writeln!(f, "Total processes: {}", self.total_processes)?;
        writeln!(f, "Total subsections: {}", self.total_subsections)?;
        writeln!(f, "Total question types: {}", self.question_types.len())?;
        writeln!(f, "Total questions: {}", self.tally.questions)?;
        writeln!(f, "Total answers: {}", self.tally.answers)?;

        for chapter in &self.chapters {
            writeln!(
                f,
                "Chapter: '{}' | Processes: {}",
                chapter.name,
                chapter.processes.len()
            )?;
            for process in &chapter.processes {
                writeln!(
                    f,
                    "  Process: '{}' | Subsections: {}",
                    process.name,
                    process.subsections.len()
                )?;
                for subsection in &process.subsections {
                    writeln!(
                        f,
                        "    Subsection: '{}' | Questions: {} | Answers: {}",
                        subsection.name, subsection.tally.questions, subsection.tally.answers
                    )?;
                }
                writeln!(
                    f,
                    "  Process Total: Questions: {} | Answers: {}",
                    process.tally.questions, process.tally.answers
                )?;
            }
            for (question_type, count) in &chapter.question_types {
                writeln!(f, "  QuestionType: '{question_type}' | Count: {count}")?;
            }
        }

        writeln!(f, "Total unique questions: {}", self.unique_questions)?;
        write!(f, "Total unique answers: {}", self.unique_answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{QaPair, StructureContext};

    fn record(chapter: &str, process: &str, subsection: &str, answer: &str, question_type: QuestionType) -> ExtractedRecord {
        ExtractedRecord::new(
            QaPair {
                question_type,
                question: format!("{chapter}/{process}/{subsection}/{answer}?"),
                answer: answer.to_string(),
            },
            &StructureContext::new(chapter, process, subsection),
        )
    }

    #[test]
    fn test_breakdown_counts_and_order() {
        let records = vec![
            record("Chapter 2", "Process B", "", "yes", QuestionType::Unknown),
            record("Chapter 1", "Process A", "Step 1", "yes", QuestionType::ConceptCheck),
            record("Chapter 1", "Process A", "Step 2", "", QuestionType::ConceptCheck),
            record("Chapter 1", "Process C", "Step 1", "no", QuestionType::ChallengesConceptCheck),
        ];

        let summary = AssessmentSummary::from_records(&records);

        assert_eq!(summary.total_chapters, 2);
        assert_eq!(summary.total_processes, 3);
        // The empty subsection under Chapter 2 is not counted
        assert_eq!(summary.total_subsections, 3);
        assert_eq!(summary.tally, Tally { questions: 4, answers: 3 });
        assert_eq!(summary.question_types.len(), 3);
        assert_eq!(summary.unique_answers, 3);

        assert_eq!(summary.chapters[0].name, "Chapter 2");
        let chapter_one = &summary.chapters[1];
        assert_eq!(chapter_one.processes.len(), 2);
        assert_eq!(chapter_one.processes[0].tally, Tally { questions: 2, answers: 1 });
        assert_eq!(
            chapter_one.question_types,
            vec![(QuestionType::ConceptCheck, 2), (QuestionType::ChallengesConceptCheck, 1)]
        );
    }

    #[test]
    fn test_display_lists_every_level() {
        let records = vec![record("Chapter 1", "Process A", "Step 1", "yes", QuestionType::Unknown)];
        let text = AssessmentSummary::from_records(&records).to_string();

        assert!(text.contains("Chapter: 'Chapter 1' | Processes: 1"));
        assert!(text.contains("  Process: 'Process A' | Subsections: 1"));
        assert!(text.contains("    Subsection: 'Step 1' | Questions: 1 | Answers: 1"));
        assert!(text.contains("  QuestionType: 'Unknown' | Count: 1"));
        assert!(text.ends_with("Total unique answers: 1"));
    }

    #[test]
    fn test_empty_records() {
        let summary = AssessmentSummary::from_records(&[]);
        assert_eq!(summary, AssessmentSummary::default());
    }
}
