//! Paragraph style resolution
//!
//! Paragraphs reference styles by id (`Heading1`), while authors and the
//! heading configuration talk about display names (`Heading 1`). The
//! `StyleSheet` maps one to the other using the package's styles part.

use std::collections::HashMap;

use tracing::debug;

#[derive(Debug, Clone, Default)]
pub(crate) struct StyleSheet {
    names_by_id: HashMap<String, String>,
    default_paragraph_style: String,
}

impl StyleSheet {
    pub(crate) fn from_docx(docx: &docx_rs::Docx, default_paragraph_style: &str) -> Self {
        let mut names_by_id = HashMap::new();

        for style in &docx.styles.styles {
            if let Some(name) = style_display_name(style) {
                names_by_id.insert(style.style_id.clone(), name);
            }
        }

        debug!("Resolved {} style names", names_by_id.len());

        Self {
            names_by_id,
            default_paragraph_style: default_paragraph_style.to_string(),
        }
    }

    /// Display name of the paragraph's style.
    ///
    /// No style reference means the default paragraph style. An id missing
    /// from the styles part is reported as-is; an empty id is unreadable.
    pub(crate) fn paragraph_style_name(&self, para: &docx_rs::Paragraph) -> Option<String> {
        match &para.property.style {
            None => Some(self.default_paragraph_style.clone()),
            Some(style) => self.resolve(&style.val),
        }
    }

    pub(crate) fn resolve(&self, style_id: &str) -> Option<String> {
        let style_id = style_id.trim();
        if style_id.is_empty() {
            return None;
        }
        Some(
            self.names_by_id
                .get(style_id)
                .cloned()
                .unwrap_or_else(|| style_id.to_string()),
        )
    }
}

/// Read a style's display name
fn style_display_name(style: &docx_rs::Style) -> Option<String> {
    // Name serializes as its bare string, which sidesteps its field layout
    let value = serde_json::to_value(&style.name).ok()?;
    let name = value.as_str()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
