//! Run driver: collect → generate → evaluate → persist.

use std::path::PathBuf;

use odp_core::entities::{ArtifactRecord, EvaluationResult, PaperFailure, PaperRecord};
use odp_eval::{MetricSummary, aggregate, evaluate};
use odp_llm::LlmBackend;
use odp_papers::PaperCollector;

use crate::error::PipelineError;
use crate::generator::Generator;
use crate::store::RunStore;

/// Progress notifications emitted by [`Pipeline::run_with`].
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// Papers were collected and written to `dataset.jsonl`.
    Collected { total: usize },
    /// Generation for `paper` is starting.
    PaperStarted { index: usize, paper: &'a PaperRecord },
    /// `paper` was either evaluated or recorded as a failure.
    PaperFinished {
        index: usize,
        paper: &'a PaperRecord,
        succeeded: bool,
    },
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub collected: usize,
    pub evaluated: usize,
    pub failures: Vec<PaperFailure>,
    pub summary: MetricSummary,
}

/// The end-to-end pipeline over one output directory.
///
/// Papers are processed one at a time. By default a paper whose generation
/// fails is recorded in `failures.jsonl` and the run continues; with
/// [`Pipeline::with_fail_fast`] the first failure aborts the run.
pub struct Pipeline<B, C> {
    generator: Generator<B>,
    collector: C,
    store: RunStore,
    fail_fast: bool,
}

impl<B: LlmBackend, C: PaperCollector> Pipeline<B, C> {
    #[must_use]
    pub const fn new(generator: Generator<B>, collector: C, store: RunStore) -> Self {
        Self {
            generator,
            collector,
            store,
            fail_fast: false,
        }
    }

    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &RunStore {
        &self.store
    }

    /// Search for papers and write them to `dataset.jsonl`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Search`] if the search fails, [`PipelineError::Io`]
    /// if the dataset cannot be written.
    pub async fn collect_dataset(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PaperRecord>, PipelineError> {
        let papers = self.collector.search(query, limit).await?;
        let path = self.store.write_dataset(&papers)?;
        tracing::info!(query, limit, collected = papers.len(), path = %path.display(), "dataset written");
        Ok(papers)
    }

    /// Run the whole pipeline for `query`.
    ///
    /// # Errors
    ///
    /// See [`Self::run_with`].
    pub async fn run(&self, query: &str, limit: u32) -> Result<RunReport, PipelineError> {
        self.run_with(query, limit, |_| {}).await
    }

    /// Run the whole pipeline, reporting progress to `on_event`.
    ///
    /// # Errors
    ///
    /// Paper search and persistence errors always abort. Generation errors
    /// abort only in fail-fast mode.
    pub async fn run_with<F>(
        &self,
        query: &str,
        limit: u32,
        mut on_event: F,
    ) -> Result<RunReport, PipelineError>
    where
        F: FnMut(RunEvent<'_>) + Send,
    {
        let papers = self.collect_dataset(query, limit).await?;
        on_event(RunEvent::Collected {
            total: papers.len(),
        });

        let mut records: Vec<ArtifactRecord> = Vec::with_capacity(papers.len());
        let mut evaluations: Vec<EvaluationResult> = Vec::with_capacity(papers.len());
        let mut failures = Vec::new();

        for (index, paper) in papers.iter().enumerate() {
            on_event(RunEvent::PaperStarted { index, paper });
            let succeeded = match self.generator.generate_for_paper(paper).await {
                Ok(generation) => {
                    let evaluation =
                        evaluate(paper, &generation.scenario, &generation.graph, &generation.odp);
                    tracing::info!(
                        paper_id = %paper.paper_id,
                        pattern = %generation.odp.pattern_name,
                        self_consistency = evaluation.self_consistency,
                        "paper evaluated"
                    );
                    evaluations.push(evaluation.clone());
                    records.push(ArtifactRecord {
                        paper: paper.clone(),
                        scenario: generation.scenario,
                        graph: generation.graph,
                        odp: generation.odp,
                        evaluation,
                    });
                    true
                }
                Err(error) if self.fail_fast => {
                    tracing::error!(paper_id = %paper.paper_id, %error, "paper failed, aborting run");
                    return Err(error);
                }
                Err(error) => {
                    tracing::warn!(
                        paper_id = %paper.paper_id,
                        stage = ?error.stage(),
                        %error,
                        "paper failed, continuing"
                    );
                    failures.push(PaperFailure {
                        paper_id: paper.paper_id.clone(),
                        stage: error.stage(),
                        message: error.to_string(),
                    });
                    false
                }
            };
            on_event(RunEvent::PaperFinished {
                index,
                paper,
                succeeded,
            });
        }

        let summary = aggregate(&evaluations);
        self.store.write_artifacts(&records)?;
        self.store.write_evaluations(&evaluations)?;
        self.store.write_summary(&summary)?;
        self.store.write_failures(&failures)?;

        tracing::info!(
            collected = papers.len(),
            evaluated = evaluations.len(),
            failed = failures.len(),
            output_dir = %self.store.dir().display(),
            "run complete"
        );

        Ok(RunReport {
            output_dir: self.store.dir().to_path_buf(),
            collected: papers.len(),
            evaluated: evaluations.len(),
            failures,
            summary,
        })
    }
}
