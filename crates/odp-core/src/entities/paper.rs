use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PaperSource;

/// A paper fetched from a search collaborator. Immutable once collected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperRecord {
    pub paper_id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub source: PaperSource,
}
