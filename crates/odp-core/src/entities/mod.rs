//! Entity structs for every pipeline stage.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Stage
//! outputs (`ScenarioAndCqs`, `ConceptRelationGraph`, `OdpArtifact`) reject
//! unknown fields and declare their defaults up front, so the generated
//! schema is exactly the contract the model must satisfy.

mod artifact;
mod evaluation;
mod graph;
mod paper;
mod record;
mod scenario;

pub use artifact::OdpArtifact;
pub use evaluation::EvaluationResult;
pub use graph::{ConceptRelationGraph, Triple};
pub use paper::PaperRecord;
pub use record::{ArtifactRecord, PaperFailure};
pub use scenario::ScenarioAndCqs;
