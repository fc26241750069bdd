//! Per-paper generation chain: scenario → graph → ODP.

use odp_core::entities::{ConceptRelationGraph, OdpArtifact, PaperRecord, ScenarioAndCqs};
use odp_core::enums::Stage;
use odp_llm::{JsonCaller, LlmBackend};
use odp_schema::SchemaRegistry;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PipelineError;
use crate::prompts::{graph_prompt, odp_prompt, scenario_prompt};

/// The three stage outputs for one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub scenario: ScenarioAndCqs,
    pub graph: ConceptRelationGraph,
    pub odp: OdpArtifact,
}

/// Runs the three stages for a paper, each feeding the next.
///
/// Every stage is one retried [`JsonCaller::call`] followed by schema
/// validation. Validation failures are not retried.
pub struct Generator<B> {
    caller: JsonCaller<B>,
    schemas: SchemaRegistry,
}

impl<B: LlmBackend> Generator<B> {
    #[must_use]
    pub fn new(caller: JsonCaller<B>) -> Self {
        Self {
            caller,
            schemas: SchemaRegistry::new(),
        }
    }

    #[must_use]
    pub const fn caller(&self) -> &JsonCaller<B> {
        &self.caller
    }

    /// Generate the scenario, graph, and ODP for `paper`, in that order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Llm`] when a stage's call exhausts its retries, or
    /// [`PipelineError::Schema`] when its JSON does not fit the stage schema.
    /// Both carry the failing [`Stage`]; later stages are not attempted.
    pub async fn generate_for_paper(
        &self,
        paper: &PaperRecord,
    ) -> Result<Generation, PipelineError> {
        let scenario: ScenarioAndCqs = self
            .run_stage(
                &paper.paper_id,
                Stage::Scenario,
                &scenario_prompt(&paper.title, &paper.abstract_text),
            )
            .await?;

        let graph: ConceptRelationGraph = self
            .run_stage(
                &paper.paper_id,
                Stage::Graph,
                &graph_prompt(&scenario.scenario, &scenario.competency_questions),
            )
            .await?;

        let odp: OdpArtifact = self
            .run_stage(
                &paper.paper_id,
                Stage::Odp,
                &odp_prompt(&scenario.scenario, &graph.triples),
            )
            .await?;

        Ok(Generation {
            scenario,
            graph,
            odp,
        })
    }

    async fn run_stage<T: DeserializeOwned>(
        &self,
        paper_id: &str,
        stage: Stage,
        prompt: &str,
    ) -> Result<T, PipelineError> {
        tracing::debug!(paper_id, %stage, prompt_chars = prompt.len(), "running stage");
        let object = self
            .caller
            .call(prompt)
            .await
            .map_err(|source| PipelineError::Llm { stage, source })?;
        self.schemas
            .parse_stage(stage, Value::Object(object))
            .map_err(|source| PipelineError::Schema { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use odp_core::entities::Triple;
    use odp_llm::{LlmError, RetryPolicy};
    use pretty_assertions::assert_eq;

    /// Answers each stage by prompt prefix and records the prompts it sees.
    struct StageLlm {
        scenario: &'static str,
        graph: &'static str,
        odp: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    impl StageLlm {
        fn new(scenario: &'static str, graph: &'static str, odp: &'static str) -> Self {
            Self {
                scenario,
                graph,
                odp,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmBackend for StageLlm {
        fn name(&self) -> &'static str {
            "stage"
        }

        async fn generate(
            &self,
            prompt: &str,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let reply = if prompt.starts_with("You are an ontology engineer") {
                self.scenario
            } else if prompt.starts_with("Extract a concept-relation graph") {
                self.graph
            } else {
                self.odp
            };
            Ok(reply.to_string())
        }
    }

    const SCENARIO: &str = r#"Sure! {"scenario": "Hospitals treat patients.", "competency_questions": ["Which patient?"]}"#;
    const GRAPH: &str = r#"{"concepts": ["Patient", "Treatment"], "relations": ["receives"], "triples": [["Patient", "receives", "Treatment"]]}"#;
    const ODP: &str = r#"{"pattern_name": "TreatmentPattern", "intent": "Model treatments.", "classes": ["Patient"]}"#;

    fn paper() -> PaperRecord {
        PaperRecord {
            paper_id: "p1".into(),
            title: "Treating patients".into(),
            abstract_text: "Hospitals treat patients.".into(),
            venue: None,
            year: Some(2024),
            source: odp_core::enums::PaperSource::SemanticScholar,
        }
    }

    fn generator(llm: StageLlm) -> Generator<StageLlm> {
        Generator::new(JsonCaller::new(llm, RetryPolicy::no_retry()))
    }

    #[tokio::test]
    async fn threads_outputs_between_stages() {
        let generator = generator(StageLlm::new(SCENARIO, GRAPH, ODP));

        let generation = generator.generate_for_paper(&paper()).await.unwrap();

        assert_eq!(generation.scenario.scenario, "Hospitals treat patients.");
        assert_eq!(
            generation.graph.triples,
            vec![Triple::new("Patient", "receives", "Treatment")]
        );
        assert_eq!(generation.odp.pattern_name, "TreatmentPattern");

        let prompts = generator.caller().backend().prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("TITLE: Treating patients"));
        assert!(prompts[1].contains("- Which patient?"));
        assert!(prompts[2].contains("- (Patient, receives, Treatment)"));
    }

    #[tokio::test]
    async fn schema_failure_names_stage_and_stops_chain() {
        let generator = generator(StageLlm::new(
            SCENARIO,
            r#"{"concepts": "Patient"}"#,
            ODP,
        ));

        let err = generator.generate_for_paper(&paper()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Schema { stage: Stage::Graph, .. }), "{err:?}");
        assert_eq!(err.stage(), Some(Stage::Graph));
        assert_eq!(generator.caller().backend().prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn schema_failure_is_not_retried() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: std::time::Duration::from_millis(1),
            multiplier: 2,
            max_delay: std::time::Duration::from_millis(4),
        };
        let generator = Generator::new(JsonCaller::new(
            StageLlm::new(SCENARIO, r#"{"concepts": "not-a-list"}"#, ODP),
            policy,
        ));

        let err = generator.generate_for_paper(&paper()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Schema { stage: Stage::Graph, .. }), "{err:?}");
        // one scenario call, one graph call, no graph retries
        assert_eq!(generator.caller().backend().prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_required_odp_field_is_schema_error() {
        let generator = generator(StageLlm::new(SCENARIO, GRAPH, r#"{"pattern_name": "P"}"#));

        let err = generator.generate_for_paper(&paper()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Schema { stage: Stage::Odp, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn extraction_failure_is_llm_error() {
        let generator = generator(StageLlm::new("I cannot help with that.", GRAPH, ODP));

        let err = generator.generate_for_paper(&paper()).await.unwrap_err();

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
    }
}
