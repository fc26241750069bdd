use anyhow::Context;
use odp_config::OdpConfig;
use odp_eval::MetricSummary;
use odp_llm::{Backend, JsonCaller, LlmBackend, RetryPolicy};
use odp_papers::SemanticScholarClient;
use odp_pipeline::{Generator, Pipeline, RunEvent, RunReport, RunStore};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct RunResponse {
    output_dir: String,
    collected: usize,
    evaluated: usize,
    failed: usize,
    #[serde(flatten)]
    summary: MetricSummary,
}

impl From<RunReport> for RunResponse {
    fn from(report: RunReport) -> Self {
        Self {
            output_dir: report.output_dir.display().to_string(),
            collected: report.collected,
            evaluated: report.evaluated,
            failed: report.failures.len(),
            summary: report.summary,
        }
    }
}

/// Handle `t2o run`.
pub async fn handle(args: &RunArgs, config: &OdpConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = apply_overrides(config, args);
    config.validate().context("invalid configuration")?;
    let limit = args.limit.unwrap_or(config.search.default_limit);

    let backend = Backend::from_config(&config.llm).context("failed to set up the LLM backend")?;
    let caller = JsonCaller::new(backend, RetryPolicy::from(&config.retry))
        .with_generation(config.llm.temperature, config.llm.max_tokens);
    tracing::info!(
        backend = caller.backend().name(),
        model = %config.llm.model,
        max_attempts = caller.policy().max_attempts,
        "LLM backend ready"
    );
    let collector = SemanticScholarClient::from_config(&config.search)
        .context("failed to set up the paper search client")?;
    let store = RunStore::create(config.run.output_dir.as_str())?;
    let pipeline = Pipeline::new(Generator::new(caller), collector, store)
        .with_fail_fast(config.run.fail_fast);

    let mut progress: Option<Progress> = None;
    let result = pipeline
        .run_with(&args.query, limit, |event| match event {
            RunEvent::Collected { total } => {
                progress = Some(Progress::bar(total as u64, "generating"));
            }
            RunEvent::PaperStarted { paper, .. } => {
                if let Some(bar) = &progress {
                    bar.set_message(&paper.title);
                }
            }
            RunEvent::PaperFinished { .. } => {
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }
        })
        .await;

    let report = match result {
        Ok(report) => {
            if let Some(bar) = &progress {
                bar.finish_ok(&format!(
                    "{} evaluated, {} failed",
                    report.evaluated,
                    report.failures.len()
                ));
            }
            report
        }
        Err(error) => {
            if let Some(bar) = &progress {
                bar.finish_err("run aborted");
            }
            return Err(anyhow::Error::from(error)
                .context(format!("run for query '{}' failed", args.query)));
        }
    };

    output(&RunResponse::from(report), flags.format)
}

/// Command-line values take precedence over the loaded configuration.
fn apply_overrides(config: &OdpConfig, args: &RunArgs) -> OdpConfig {
    let mut config = config.clone();
    if let Some(backend) = args.backend {
        config.llm.backend = backend;
    }
    if let Some(model) = &args.model {
        config.llm.model.clone_from(model);
    }
    if let Some(dir) = &args.output_dir {
        config.run.output_dir.clone_from(dir);
    }
    config.run.fail_fast |= args.fail_fast;
    config
}

#[cfg(test)]
mod tests {
    use odp_core::enums::LlmBackendKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            query: "q".into(),
            limit: None,
            backend: None,
            model: None,
            output_dir: None,
            fail_fast: false,
        }
    }

    #[test]
    fn no_flags_keep_config() {
        let mut config = OdpConfig::default();
        config.run.fail_fast = true;

        let merged = apply_overrides(&config, &args());

        assert_eq!(merged.llm.backend, config.llm.backend);
        assert_eq!(merged.llm.model, config.llm.model);
        assert_eq!(merged.run.output_dir, config.run.output_dir);
        assert!(merged.run.fail_fast);
    }

    #[test]
    fn flags_override_config() {
        let args = RunArgs {
            backend: Some(LlmBackendKind::Local),
            model: Some("qwen2.5:7b".into()),
            output_dir: Some("outputs/run_2".into()),
            fail_fast: true,
            ..args()
        };

        let merged = apply_overrides(&OdpConfig::default(), &args);

        assert_eq!(merged.llm.backend, LlmBackendKind::Local);
        assert_eq!(merged.llm.model, "qwen2.5:7b");
        assert_eq!(merged.run.output_dir, "outputs/run_2");
        assert!(merged.run.fail_fast);
    }

    #[test]
    fn local_override_without_model_path_fails_validation() {
        let args = RunArgs {
            backend: Some(LlmBackendKind::Local),
            ..args()
        };
        let merged = apply_overrides(&OdpConfig::default(), &args);
        assert!(merged.validate().is_err());
    }

    #[test]
    fn response_flattens_summary() {
        let mut summary = MetricSummary::new();
        summary.insert("self_consistency_mean".into(), 1.0);
        let response = RunResponse {
            output_dir: "outputs".into(),
            collected: 2,
            evaluated: 1,
            failed: 1,
            summary,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["failed"], 1);
        assert_eq!(value["self_consistency_mean"], 1.0);
    }
}
