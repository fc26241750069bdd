//! Run output directory layout.
//!
//! ```text
//! <output_dir>/
//!   dataset.jsonl            one PaperRecord per line
//!   artifacts.json           pretty JSON array of ArtifactRecord
//!   evaluation.csv           one EvaluationResult per row, header always present
//!   evaluation_summary.json  {metric}_mean / {metric}_std
//!   failures.jsonl           one PaperFailure per line, only if a paper failed
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use odp_core::entities::{ArtifactRecord, EvaluationResult, PaperFailure, PaperRecord};
use odp_eval::{Metric, MetricSummary};
use serde::Serialize;

use crate::error::PipelineError;

pub const DATASET_FILE: &str = "dataset.jsonl";
pub const ARTIFACTS_FILE: &str = "artifacts.json";
pub const EVALUATION_FILE: &str = "evaluation.csv";
pub const SUMMARY_FILE: &str = "evaluation_summary.json";
pub const FAILURES_FILE: &str = "failures.jsonl";

/// Writes the files of one run into a single directory.
#[derive(Debug, Clone)]
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Use `dir` for run output, creating it if needed.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Io`] if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// # Errors
    ///
    /// [`PipelineError::Io`] on write failure.
    pub fn write_dataset(&self, papers: &[PaperRecord]) -> Result<PathBuf, PipelineError> {
        let path = self.path(DATASET_FILE);
        serde_jsonlines::write_json_lines(&path, papers).map_err(|source| io_error(&path, source))?;
        Ok(path)
    }

    /// # Errors
    ///
    /// [`PipelineError::Io`] or [`PipelineError::Json`] on write failure.
    pub fn write_artifacts(&self, records: &[ArtifactRecord]) -> Result<PathBuf, PipelineError> {
        self.write_pretty_json(ARTIFACTS_FILE, &records)
    }

    /// # Errors
    ///
    /// [`PipelineError::Io`] or [`PipelineError::Json`] on write failure.
    pub fn write_summary(&self, summary: &MetricSummary) -> Result<PathBuf, PipelineError> {
        self.write_pretty_json(SUMMARY_FILE, summary)
    }

    /// Write `evaluation.csv`. The header is written even when `results` is
    /// empty.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Csv`] on write failure.
    pub fn write_evaluations(
        &self,
        results: &[EvaluationResult],
    ) -> Result<PathBuf, PipelineError> {
        let path = self.path(EVALUATION_FILE);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(evaluation_header())?;
        for result in results {
            writer.serialize(result)?;
        }
        writer
            .flush()
            .map_err(|source| io_error(&path, source))?;
        Ok(path)
    }

    /// Write `failures.jsonl`, or remove a stale one when nothing failed.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Io`] on write or removal failure.
    pub fn write_failures(
        &self,
        failures: &[PaperFailure],
    ) -> Result<Option<PathBuf>, PipelineError> {
        let path = self.path(FAILURES_FILE);
        if failures.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => Ok(None),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(io_error(&path, source)),
            };
        }
        serde_jsonlines::write_json_lines(&path, failures)
            .map_err(|source| io_error(&path, source))?;
        Ok(Some(path))
    }

    fn write_pretty_json<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<PathBuf, PipelineError> {
        let path = self.path(file);
        let handle = File::create(&path).map_err(|source| io_error(&path, source))?;
        let mut writer = BufWriter::new(handle);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|source| io_error(&path, source))?;
        Ok(path)
    }
}

/// `paper_id`, the four metrics in order, then `notes`.
fn evaluation_header() -> Vec<&'static str> {
    let mut header = vec!["paper_id"];
    header.extend(Metric::ALL.iter().map(|m| m.as_str()));
    header.push("notes");
    header
}

fn io_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.to_path_buf(),
        source,
    }
}
