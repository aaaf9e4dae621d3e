//! Structural context tracking
//!
//! `StructureTracker::update` is a pure step function: it takes the current
//! context and one styled paragraph and returns the next context. The
//! traversal driver threads the value through the document itself, so the
//! context only ever moves forward and is never rolled back.

use serde::{Deserialize, Serialize};

use crate::document::{normalize_whitespace, HeadingLevel, HeadingStyles, StyledParagraph};

/// Running chapter/process/subsection state.
///
/// An empty string means "not seen yet". The `*_style` fields record which
/// style name set each field, for the optional audit columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureContext {
    pub chapter: String,
    pub process: String,
    pub subsection: String,
    pub chapter_style: String,
    pub process_style: String,
    pub subsection_style: String,
}

impl StructureContext {
    pub fn new(
        chapter: impl Into<String>,
        process: impl Into<String>,
        subsection: impl Into<String>,
    ) -> Self {
        Self {
            chapter: chapter.into(),
            process: process.into(),
            subsection: subsection.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StructureTracker {
    headings: HeadingStyles,
}

impl StructureTracker {
    pub fn new(headings: HeadingStyles) -> Self {
        Self { headings }
    }

    /// Apply one paragraph to the context.
    ///
    /// At most one field changes. Blank text, an unreadable style and any
    /// non-heading style all return the context unchanged.
    pub fn update(
        &self,
        mut context: StructureContext,
        paragraph: &StyledParagraph,
    ) -> StructureContext {
        let Some(style_name) = paragraph.style_name.as_deref() else {
            return context;
        };
        let Some(level) = self.headings.level_of(style_name) else {
            return context;
        };

        let text = normalize_whitespace(&paragraph.text);
        if text.is_empty() {
            return context;
        }

        let style = style_name.to_lowercase();
        match level {
            HeadingLevel::Chapter => {
                context.chapter = text;
                context.chapter_style = style;
            }
            HeadingLevel::Process => {
                context.process = text;
                context.process_style = style;
            }
            HeadingLevel::Subsection => {
                context.subsection = text;
                context.subsection_style = style;
            }
        }

        context
    }

    /// Fold `update` over a paragraph sequence
    pub fn replay<'a>(
        &self,
        context: StructureContext,
        paragraphs: impl IntoIterator<Item = &'a StyledParagraph>,
    ) -> StructureContext {
        paragraphs
            .into_iter()
            .fold(context, |context, paragraph| self.update(context, paragraph))
    }
}
