//! File validation
//!
//! This module checks that a path points at a Word package before the
//! loader hands its bytes to docx-rs.

use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::error::LoadError;

/// Returns true for paths with a `.docx` extension (any case)
pub fn has_docx_extension(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<(), LoadError> {
    if !has_docx_extension(file_path) {
        let extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        return Err(LoadError::InvalidFormat {
            path: file_path.to_path_buf(),
            reason: format!(
                "expected .docx file, got .{extension} (only Word .docx files are supported, not .doc, .xlsx, .zip)"
            ),
        });
    }

    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path).map_err(|source| LoadError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| LoadError::Archive {
        path: file_path.to_path_buf(),
        source,
    })?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        let reason = if archive.by_name("xl/workbook.xml").is_ok() {
            "this appears to be an Excel workbook renamed to .docx".to_string()
        } else {
            "missing word/document.xml; the file may be corrupted or is not a Word document"
                .to_string()
        };
        return Err(LoadError::InvalidFormat {
            path: file_path.to_path_buf(),
            reason,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_extension_is_case_insensitive() {
        assert!(has_docx_extension(Path::new("guide.docx")));
        assert!(has_docx_extension(Path::new("GUIDE.DOCX")));
        assert!(!has_docx_extension(Path::new("guide.doc")));
        assert!(!has_docx_extension(Path::new("guide")));
    }

    #[test]
    fn test_wrong_extension_is_rejected_before_opening() {
        let err = validate_docx_file(Path::new("does-not-exist.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat { .. }));
        assert!(err.to_string().contains(".xlsx"));
    }
}
