//! Cross-paper statistics.

use indexmap::IndexMap;
use odp_core::entities::EvaluationResult;

use crate::metrics::{Metric, round4};

/// `{metric}_mean` / `{metric}_std` pairs, in metric order.
pub type MetricSummary = IndexMap<String, f64>;

/// Mean and population standard deviation. `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_and_pstdev(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Append the rounded mean and std of `values` under `metric`.
pub(crate) fn insert_stats(summary: &mut MetricSummary, metric: &str, values: &[f64]) {
    if let Some((mean, std)) = mean_and_pstdev(values) {
        summary.insert(format!("{metric}_mean"), round4(mean));
        summary.insert(format!("{metric}_std"), round4(std));
    }
}

/// Summarize a batch of per-paper results. Empty input yields an empty map.
#[must_use]
pub fn aggregate(results: &[EvaluationResult]) -> MetricSummary {
    let mut summary = MetricSummary::new();
    if results.is_empty() {
        return summary;
    }
    for metric in Metric::ALL {
        let values: Vec<f64> = results.iter().map(|r| metric.value(r)).collect();
        insert_stats(&mut summary, metric.as_str(), &values);
    }
    summary
}
