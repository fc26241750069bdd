//! Full runs against a stub paper source and a stub model.

use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use odp_core::entities::{ArtifactRecord, PaperFailure, PaperRecord};
use odp_core::enums::{PaperSource, Stage};
use odp_llm::{JsonCaller, LlmBackend, LlmError, RetryPolicy};
use odp_papers::{PaperCollector, SearchError};
use odp_pipeline::{
    ARTIFACTS_FILE, DATASET_FILE, EVALUATION_FILE, FAILURES_FILE, Generator, Pipeline,
    PipelineError, RunEvent, RunStore, SUMMARY_FILE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

struct StubCollector {
    papers: Vec<PaperRecord>,
}

impl PaperCollector for StubCollector {
    async fn search(&self, _query: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        Ok(self.papers.iter().take(limit as usize).cloned().collect())
    }
}

struct FailingCollector;

impl PaperCollector for FailingCollector {
    async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        Err(SearchError::RateLimited {
            retry_after_secs: 30,
        })
    }
}

/// Answers by stage; papers titled "Broken ..." never yield a scenario.
struct StubLlm {
    calls: Mutex<usize>,
}

impl StubLlm {
    const fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }
}

impl LlmBackend for StubLlm {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(
        &self,
        prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        *self.calls.lock().unwrap() += 1;
        if prompt.contains("TITLE: Broken") {
            return Ok("I am unable to produce JSON for this paper.".into());
        }
        let reply = if prompt.starts_with("You are an ontology engineer") {
            json!({
                "scenario": "A hospital monitors patients, treatments, and outcomes.",
                "competency_questions": [
                    "Which patient receives which treatment?",
                    "What outcomes are associated with treatments?",
                    "Which hospital records the treatment?",
                    "How are outcomes measured over time?",
                    "Which patient has a specific outcome?"
                ]
            })
        } else if prompt.starts_with("Extract a concept-relation graph") {
            json!({
                "concepts": ["Patient", "Treatment", "Outcome", "Hospital"],
                "relations": ["receives", "hasOutcome", "recordedBy"],
                "triples": [
                    ["Patient", "receives", "Treatment"],
                    ["Patient", "hasOutcome", "Outcome"],
                    ["Treatment", "recordedBy", "Hospital"]
                ]
            })
        } else {
            json!({
                "pattern_name": "PatientTreatmentOutcomePattern",
                "intent": "Represent how patients receive treatments and produce outcomes.",
                "classes": ["Patient", "Treatment", "Outcome", "Hospital"],
                "object_properties": ["receives", "hasOutcome", "recordedBy"],
                "axioms_manchester": [
                    "Patient SubClassOf receives some Treatment",
                    "Patient SubClassOf hasOutcome some Outcome"
                ],
                "ttl_fragment": "@prefix ex: <http://example.org/> ."
            })
        };
        Ok(format!("```json\n{reply}\n```"))
    }
}

fn paper(id: &str, title: &str) -> PaperRecord {
    PaperRecord {
        paper_id: id.into(),
        title: title.into(),
        abstract_text: "Patients receive treatments and produce outcomes in hospitals.".into(),
        venue: Some("TestConf".into()),
        year: Some(2025),
        source: PaperSource::SemanticScholar,
    }
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        multiplier: 2,
        max_delay: Duration::from_millis(1),
    }
}

fn pipeline(
    dir: &TempDir,
    papers: Vec<PaperRecord>,
) -> Pipeline<StubLlm, StubCollector> {
    Pipeline::new(
        Generator::new(JsonCaller::new(StubLlm::new(), fast_retry())),
        StubCollector { papers },
        RunStore::create(dir.path()).unwrap(),
    )
}

fn read(dir: &TempDir, file: &str) -> String {
    fs::read_to_string(dir.path().join(file)).unwrap()
}

#[tokio::test]
async fn single_paper_run_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir, vec![paper("p1", "A study on patient trajectories")]);

    let report = pipeline.run("patient treatment", 1).await.unwrap();

    assert_eq!(report.collected, 1);
    assert_eq!(report.evaluated, 1);
    assert!(report.failures.is_empty());
    assert_eq!(report.summary["self_consistency_mean"], 1.0);
    assert_eq!(report.summary["graph_density_mean"], 0.25);
    assert_eq!(report.summary["cq_answerability_proxy_mean"], 0.6);
    assert_eq!(report.summary["lexical_coverage_mean"], 0.0);

    assert_eq!(read(&dir, DATASET_FILE).lines().count(), 1);

    let artifacts: Vec<ArtifactRecord> = serde_json::from_str(&read(&dir, ARTIFACTS_FILE)).unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].paper.paper_id, "p1");
    assert_eq!(artifacts[0].odp.pattern_name, "PatientTreatmentOutcomePattern");
    assert_eq!(artifacts[0].graph.triples.len(), 3);

    let csv = read(&dir, EVALUATION_FILE);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "paper_id,lexical_coverage,graph_density,cq_answerability_proxy,self_consistency,notes"
    );
    assert!(lines[1].starts_with("p1,0.0,0.25,0.6,1.0,\"Scores in [0,1]."));

    let summary: serde_json::Value = serde_json::from_str(&read(&dir, SUMMARY_FILE)).unwrap();
    assert_eq!(summary["self_consistency_mean"], 1.0);
    assert_eq!(summary["self_consistency_std"], 0.0);

    assert!(!dir.path().join(FAILURES_FILE).exists());
}

#[tokio::test]
async fn failing_paper_is_isolated() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(
        &dir,
        vec![
            paper("p1", "A study on patient trajectories"),
            paper("p2", "Broken abstract handling"),
            paper("p3", "Hospital outcome registries"),
        ],
    );

    let report = pipeline.run("patients", 10).await.unwrap();

    assert_eq!(report.collected, 3);
    assert_eq!(report.evaluated, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].paper_id, "p2");
    assert_eq!(report.failures[0].stage, Some(Stage::Scenario));

    assert_eq!(read(&dir, EVALUATION_FILE).lines().count(), 3);

    let failures: Vec<PaperFailure> = serde_jsonlines::json_lines(dir.path().join(FAILURES_FILE))
        .unwrap()
        .collect::<std::io::Result<_>>()
        .unwrap();
    assert_eq!(failures, report.failures);
    assert!(failures[0].message.contains("no JSON object"));
}

#[tokio::test]
async fn fail_fast_aborts_on_first_failure() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(
        &dir,
        vec![
            paper("p1", "Broken from the start"),
            paper("p2", "A study on patient trajectories"),
        ],
    )
    .with_fail_fast(true);

    let err = pipeline.run("patients", 10).await.unwrap_err();

    assert!(
        matches!(
            err,
            PipelineError::Llm {
                stage: Stage::Scenario,
                source: LlmError::Extraction
            }
        ),
        "{err:?}"
    );
    assert!(dir.path().join(DATASET_FILE).exists());
    assert!(!dir.path().join(ARTIFACTS_FILE).exists());
}

#[tokio::test]
async fn empty_search_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir, Vec::new());

    let report = pipeline.run("nothing matches", 10).await.unwrap();

    assert_eq!(report.collected, 0);
    assert!(report.summary.is_empty());
    assert_eq!(read(&dir, EVALUATION_FILE).lines().count(), 1);
    assert_eq!(read(&dir, SUMMARY_FILE), "{}");
    assert_eq!(read(&dir, ARTIFACTS_FILE), "[]");
}

#[tokio::test]
async fn search_failure_aborts_run() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(
        Generator::new(JsonCaller::new(StubLlm::new(), fast_retry())),
        FailingCollector,
        RunStore::create(dir.path()).unwrap(),
    );

    let err = pipeline.run("anything", 5).await.unwrap_err();

    assert!(matches!(err, PipelineError::Search(SearchError::RateLimited { .. })));
    assert!(!dir.path().join(DATASET_FILE).exists());
}

#[tokio::test]
async fn events_follow_paper_order() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(
        &dir,
        vec![
            paper("p1", "A study on patient trajectories"),
            paper("p2", "Broken abstract handling"),
        ],
    );
    let mut seen = Vec::new();

    pipeline
        .run_with("patients", 10, |event| {
            seen.push(match event {
                RunEvent::Collected { total } => format!("collected {total}"),
                RunEvent::PaperStarted { paper, .. } => format!("start {}", paper.paper_id),
                RunEvent::PaperFinished {
                    paper, succeeded, ..
                } => format!("done {} {succeeded}", paper.paper_id),
            });
        })
        .await
        .unwrap();

    assert_eq!(
        seen,
        vec![
            "collected 2",
            "start p1",
            "done p1 true",
            "start p2",
            "done p2 false",
        ]
    );
}

#[tokio::test]
async fn limit_is_passed_to_collector() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(
        &dir,
        vec![paper("p1", "One"), paper("p2", "Two"), paper("p3", "Three")],
    );

    let papers = pipeline.collect_dataset("q", 2).await.unwrap();

    assert_eq!(papers.len(), 2);
    assert_eq!(read(&dir, DATASET_FILE).lines().count(), 2);
}
