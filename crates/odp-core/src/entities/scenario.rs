use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stage 1 output: a domain scenario and the competency questions it raises.
///
/// The prompt asks for at least five questions; fewer are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioAndCqs {
    pub scenario: String,
    #[serde(default)]
    pub competency_questions: Vec<String>,
}
