use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stage 3 output: a candidate Ontology Design Pattern.
///
/// `axioms_manchester` holds Manchester-syntax strings and `ttl_fragment` an
/// opaque Turtle snippet; neither is checked against `classes` or
/// `object_properties`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OdpArtifact {
    pub pattern_name: String,
    pub intent: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub object_properties: Vec<String>,
    #[serde(default)]
    pub axioms_manchester: Vec<String>,
    #[serde(default)]
    pub ttl_fragment: String,
}
