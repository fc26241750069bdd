//! Summaries across repeated runs.
//!
//! Each run lives in a `run_*` directory under a results root and carries
//! its own `evaluation.csv`. A run is first reduced to the mean of every
//! metric column; the run means are then summarized the same way
//! [`aggregate`](crate::aggregate) summarizes papers.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use globset::{Glob, GlobMatcher};
use indexmap::IndexMap;

use crate::aggregate::{MetricSummary, insert_stats, mean_and_pstdev};
use crate::error::SummarizeError;

/// CSV columns that are not metrics.
const NON_METRIC_COLUMNS: [&str; 2] = ["paper_id", "notes"];

static RUN_DIR: LazyLock<GlobMatcher> = LazyLock::new(|| {
    Glob::new("run_*")
        .expect("run directory pattern is valid")
        .compile_matcher()
});

/// Per-metric means of one run, in CSV column order.
struct RunMeans {
    path: PathBuf,
    means: IndexMap<String, f64>,
}

/// Summarize every `root/run_*/evaluation.csv`.
///
/// Runs without data rows are skipped. The metric set and order come from
/// the first run (in directory-name order). A missing or empty root yields
/// an empty summary.
///
/// # Errors
///
/// [`SummarizeError::Io`] if `root` cannot be listed, [`SummarizeError::Csv`]
/// for unreadable files, [`SummarizeError::InvalidValue`] for non-numeric
/// metric cells, and [`SummarizeError::MissingColumn`] when runs disagree on
/// their metric columns.
pub fn summarize_runs(root: &Path) -> Result<MetricSummary, SummarizeError> {
    let mut runs = Vec::new();
    for csv_path in run_csv_files(root)? {
        match run_means(&csv_path)? {
            Some(means) => runs.push(means),
            None => tracing::debug!(path = %csv_path.display(), "skipping run without rows"),
        }
    }

    let mut summary = MetricSummary::new();
    let Some(first) = runs.first() else {
        return Ok(summary);
    };
    for metric in first.means.keys() {
        let values = runs
            .iter()
            .map(|run| {
                run.means
                    .get(metric)
                    .copied()
                    .ok_or_else(|| SummarizeError::MissingColumn {
                        path: run.path.clone(),
                        column: metric.clone(),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        insert_stats(&mut summary, metric, &values);
    }
    tracing::info!(runs = runs.len(), root = %root.display(), "summarized runs");
    Ok(summary)
}

fn run_csv_files(root: &Path) -> Result<Vec<PathBuf>, SummarizeError> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(SummarizeError::Io {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SummarizeError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() || !RUN_DIR.is_match(entry.file_name()) {
            continue;
        }
        let csv_path = path.join("evaluation.csv");
        if csv_path.is_file() {
            files.push(csv_path);
        }
    }
    files.sort();
    Ok(files)
}

fn run_means(csv_path: &Path) -> Result<Option<RunMeans>, SummarizeError> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let columns: Vec<(usize, String)> = reader
        .headers()?
        .iter()
        .enumerate()
        .filter(|(_, name)| !NON_METRIC_COLUMNS.contains(name))
        .map(|(index, name)| (index, name.to_string()))
        .collect();

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for record in reader.records() {
        let record = record?;
        for ((index, name), column_values) in columns.iter().zip(values.iter_mut()) {
            let raw = record.get(*index).unwrap_or_default();
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| SummarizeError::InvalidValue {
                    path: csv_path.to_path_buf(),
                    column: name.clone(),
                    value: raw.to_string(),
                })?;
            column_values.push(value);
        }
    }

    let mut means = IndexMap::new();
    for ((_, name), column_values) in columns.into_iter().zip(&values) {
        match mean_and_pstdev(column_values) {
            Some((mean, _)) => {
                means.insert(name, mean);
            }
            None => return Ok(None),
        }
    }
    if means.is_empty() {
        return Ok(None);
    }
    Ok(Some(RunMeans {
        path: csv_path.to_path_buf(),
        means,
    }))
}
