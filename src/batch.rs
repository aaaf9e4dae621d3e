//! Batch processing of many documents
//!
//! Each document is one task: read, parse, extract and clean, with its own
//! structural context and dedup set. Tasks share nothing but the read-only
//! parser, run on a fixed number of worker permits, and fail independently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::document::loader::read_document_bytes;
use crate::document::{has_docx_extension, parse_docx_bytes, LoadOptions};
use crate::error::LoadError;
use crate::extract::{clean_records, DocumentParser, ExtractedRecord};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub workers: usize,
    pub clean: bool,
    pub load: LoadOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            clean: true,
            load: LoadOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub title: String,
    pub records: Vec<ExtractedRecord>,
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Per-document results and failures, both in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// All records, document after document
    pub fn combined_records(&self) -> Vec<ExtractedRecord> {
        self.documents
            .iter()
            .flat_map(|doc| doc.records.iter().cloned())
            .collect()
    }

    pub fn record_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.records.len()).sum()
    }

    /// True when there was input and none of it succeeded
    pub fn all_failed(&self) -> bool {
        self.documents.is_empty() && !self.failures.is_empty()
    }
}

/// List the .docx files directly inside `dir`, sorted, without Word lock files
pub fn discover_documents(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"));
        if path.is_file() && has_docx_extension(&path) && !is_lock_file {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Process every .docx file in `dir`
pub async fn process_directory(
    dir: &Path,
    parser: Arc<DocumentParser>,
    options: BatchOptions,
) -> Result<BatchReport, LoadError> {
    let paths = discover_documents(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    info!("Found {} documents in {}", paths.len(), dir.display());
    Ok(process_documents(paths, parser, options).await)
}

/// Run one task per document on `options.workers` permits
pub async fn process_documents(
    paths: Vec<PathBuf>,
    parser: Arc<DocumentParser>,
    options: BatchOptions,
) -> BatchReport {
    let semaphore = Arc::new(Semaphore::new(options.workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.iter().cloned().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let parser = Arc::clone(&parser);
        let options = options.clone();

        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => process_document(&path, parser, &options).await,
                Err(e) => Err(LoadError::Task {
                    path: path.clone(),
                    message: e.to_string(),
                }),
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<DocumentOutcome, LoadError>>> =
        paths.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => warn!("Batch task did not complete: {}", e),
        }
    }

    let mut report = BatchReport::default();
    for (path, slot) in paths.into_iter().zip(slots) {
        let result = slot.unwrap_or_else(|| {
            Err(LoadError::Task {
                path: path.clone(),
                message: "task did not report a result".to_string(),
            })
        });
        match result {
            Ok(outcome) => report.documents.push(outcome),
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                report.failures.push(DocumentFailure { path, error });
            }
        }
    }

    info!(
        "Batch finished: {} documents, {} records, {} failures",
        report.documents.len(),
        report.record_count(),
        report.failures.len()
    );

    report
}

/// Read, parse, extract and optionally clean a single document
pub async fn process_document(
    path: &Path,
    parser: Arc<DocumentParser>,
    options: &BatchOptions,
) -> Result<DocumentOutcome, LoadError> {
    info!(stage = "parse", "Parsing {}", path.display());
    let bytes = read_document_bytes(path).await?;

    let owned_path = path.to_path_buf();
    let load = options.load.clone();
    let clean = options.clean;

    tokio::task::spawn_blocking(move || -> Result<DocumentOutcome, LoadError> {
        let document = parse_docx_bytes(&bytes, &owned_path, &load)?;
        let mut records = parser.parse(&document);
        if clean {
            info!(stage = "clean", "Cleaning {} records from {}", records.len(), document.title);
            records = clean_records(records);
        }
        Ok(DocumentOutcome {
            path: owned_path,
            title: document.title,
            records,
        })
    })
    .await
    .map_err(|e| LoadError::Task {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?
}
