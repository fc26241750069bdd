use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A `(subject, relation, object)` statement, serialized as a 3-element array.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Triple(pub String, pub String, pub String);

impl Triple {
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self(subject.into(), relation.into(), object.into())
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn relation(&self) -> &str {
        &self.1
    }

    #[must_use]
    pub fn object(&self) -> &str {
        &self.2
    }
}

/// Stage 2 output: normalized concept and relation labels plus the triples
/// connecting them.
///
/// Labels may repeat, and a triple may mention labels missing from either
/// list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConceptRelationGraph {
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub relations: Vec<String>,
    #[serde(default)]
    pub triples: Vec<Triple>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_serializes_as_array() {
        let triple = Triple::new("Patient", "receives", "Treatment");
        let json = serde_json::to_value(&triple).unwrap();
        assert_eq!(json, serde_json::json!(["Patient", "receives", "Treatment"]));
        assert_eq!(triple.subject(), "Patient");
        assert_eq!(triple.relation(), "receives");
        assert_eq!(triple.object(), "Treatment");
    }

    #[test]
    fn triple_rejects_wrong_arity() {
        let result: Result<Triple, _> = serde_json::from_str(r#"["a", "b"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn graph_fields_default_to_empty() {
        let graph: ConceptRelationGraph = serde_json::from_str("{}").unwrap();
        assert_eq!(graph, ConceptRelationGraph::default());
    }

    #[test]
    fn graph_rejects_unknown_fields() {
        let result: Result<ConceptRelationGraph, _> =
            serde_json::from_str(r#"{"concepts": [], "edges": []}"#);
        assert!(result.is_err());
    }
}
