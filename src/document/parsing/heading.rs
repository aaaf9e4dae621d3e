//! Heading detection and classification
//!
//! This module maps paragraph style names onto the three structural levels
//! of a facilitator guide. Each level accepts several style names because
//! guides use two labeling schemes for the same level (`Heading 1` and
//! `Header 2` both open a chapter).

use serde::{Deserialize, Serialize};

/// Structural level opened by a heading paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Level 1
    Chapter,
    /// Level 2
    Process,
    /// Level 3
    Subsection,
}

impl HeadingLevel {
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::Chapter => 1,
            HeadingLevel::Process => 2,
            HeadingLevel::Subsection => 3,
        }
    }
}

/// Recognized style names per heading level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStyles {
    pub chapter: Vec<String>,
    pub process: Vec<String>,
    pub subsection: Vec<String>,
}

impl Default for HeadingStyles {
    fn default() -> Self {
        Self {
            chapter: vec!["Heading 1".to_string(), "Header 2".to_string()],
            process: vec!["Heading 2".to_string(), "Header 3".to_string()],
            subsection: vec!["Heading 3".to_string(), "Header 4".to_string()],
        }
    }
}

impl HeadingStyles {
    /// Detect heading level from a style name; levels are tried in order
    pub fn level_of(&self, style_name: &str) -> Option<HeadingLevel> {
        let key = style_key(style_name);
        if key.is_empty() {
            return None;
        }

        [
            (HeadingLevel::Chapter, &self.chapter),
            (HeadingLevel::Process, &self.process),
            (HeadingLevel::Subsection, &self.subsection),
        ]
        .into_iter()
        .find(|(_, names)| names.iter().any(|name| style_key(name) == key))
        .map(|(level, _)| level)
    }
}

/// Comparison key for style names: lower-cased with whitespace removed
pub(crate) fn style_key(style_name: &str) -> String {
    style_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `style_name` matches any entry of `names` under `style_key`
pub(crate) fn style_in(style_name: &str, names: &[String]) -> bool {
    let key = style_key(style_name);
    !key.is_empty() && names.iter().any(|name| style_key(name) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_labeling_schemes_map_to_same_level() {
        let styles = HeadingStyles::default();
        assert_eq!(styles.level_of("Heading 1"), Some(HeadingLevel::Chapter));
        assert_eq!(styles.level_of("Header 2"), Some(HeadingLevel::Chapter));
        assert_eq!(styles.level_of("Heading 2"), Some(HeadingLevel::Process));
        assert_eq!(styles.level_of("Header 3"), Some(HeadingLevel::Process));
        assert_eq!(styles.level_of("Heading 3"), Some(HeadingLevel::Subsection));
    }

    #[test]
    fn test_style_names_are_case_and_space_insensitive() {
        let styles = HeadingStyles::default();
        assert_eq!(styles.level_of("heading 1"), Some(HeadingLevel::Chapter));
        assert_eq!(styles.level_of("HEADING 2"), Some(HeadingLevel::Process));
        // Style ids written without the space
        assert_eq!(styles.level_of("Heading3"), Some(HeadingLevel::Subsection));
    }

    #[test]
    fn test_unrecognized_styles_are_not_headings() {
        let styles = HeadingStyles::default();
        assert_eq!(styles.level_of("Normal"), None);
        assert_eq!(styles.level_of("Heading 10"), None);
        assert_eq!(styles.level_of("Title"), None);
        assert_eq!(styles.level_of(""), None);
    }

    #[test]
    fn test_custom_style_sets() {
        let styles = HeadingStyles {
            chapter: vec!["Module Title".to_string()],
            process: vec![],
            subsection: vec!["Step".to_string()],
        };
        assert_eq!(styles.level_of("module title"), Some(HeadingLevel::Chapter));
        assert_eq!(styles.level_of("Heading 1"), None);
        assert_eq!(styles.level_of("Step"), Some(HeadingLevel::Subsection));
        assert_eq!(HeadingLevel::Subsection.depth(), 3);
    }
}
