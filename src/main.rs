use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};

use assessment_extractor::batch::{self, BatchOptions, BatchReport};
use assessment_extractor::export::write_export;
use assessment_extractor::{AssessmentSummary, Config, ExportFormat, RecordTable};

/// Extract assessment questions from .docx facilitator guides
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A .docx file or a directory of .docx files
    input: PathBuf,

    /// Output directory for exported tables
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Write one combined table instead of one per document
    #[arg(long)]
    combined: bool,

    /// Number of documents processed at once (default: config, then CPU count)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Config file (default: <config dir>/assessment-extractor/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add ChapterStyle/ProcessStyle/SubsectionStyle audit columns
    #[arg(long)]
    include_styles: bool,

    /// Export records exactly as extracted, without the cleaning stage
    #[arg(long)]
    no_clean: bool,

    /// Log a chapter/process/subsection breakdown of the results
    #[arg(long)]
    summary: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    assessment_extractor::logging::setup_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        config.batch.workers = workers;
    }
    if cli.include_styles {
        config.export.include_style_columns = true;
    }
    if cli.no_clean {
        config.export.clean = false;
    }

    let paths = collect_inputs(&cli.input)?;
    if paths.is_empty() {
        bail!("No .docx files found in {}", cli.input.display());
    }

    let options = BatchOptions {
        workers: config.worker_count(),
        clean: config.export.clean,
        load: config.load.clone(),
    };
    info!(
        "Processing {} document(s) with {} worker(s)",
        paths.len(),
        options.workers
    );

    let parser = Arc::new(config.parser());
    let report = batch::process_documents(paths, parser, options).await;

    for failure in &report.failures {
        error!("{}", failure.error);
    }

    export_report(&report, &cli, &config)?;

    if cli.summary {
        AssessmentSummary::from_records(&report.combined_records()).log();
    }

    if report.all_failed() {
        bail!("All {} document(s) failed to load", report.failures.len());
    }
    Ok(())
}

fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        Ok(batch::discover_documents(input)?)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        bail!("Input not found: {}", input.display())
    }
}

fn export_report(report: &BatchReport, cli: &Cli, config: &Config) -> Result<()> {
    let include_styles = config.export.include_style_columns;
    let extension = cli.format.extension();

    if cli.combined {
        let table = RecordTable::new("Combined Assessment", report.combined_records())
            .with_style_columns(include_styles);
        let path = cli.output.join(format!("combined.{extension}"));
        info!(stage = "export", "Writing {} records to {}", table.len(), path.display());
        write_export(&table, &cli.format, &path)?;
        return Ok(());
    }

    for document in &report.documents {
        let table = RecordTable::new(document.title.clone(), document.records.clone())
            .with_style_columns(include_styles);
        let path = cli.output.join(format!("{}.{extension}", document.title));
        info!(stage = "export", "Writing {} records to {}", table.len(), path.display());
        write_export(&table, &cli.format, &path)?;
    }

    Ok(())
}
