//! Paper sources, LLM backend kinds, and generation stages.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and round-trip through `as_str()` / [`FromStr`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PaperSource
// ---------------------------------------------------------------------------

/// Where a paper record was fetched from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PaperSource {
    #[default]
    SemanticScholar,
    Arxiv,
}

impl PaperSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SemanticScholar => "semantic_scholar",
            Self::Arxiv => "arxiv",
        }
    }
}

impl fmt::Display for PaperSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "semantic_scholar" => Ok(Self::SemanticScholar),
            "arxiv" => Ok(Self::Arxiv),
            other => Err(CoreError::UnknownVariant {
                kind: "paper source",
                value: other.to_string(),
                expected: "semantic_scholar, arxiv",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// LlmBackendKind
// ---------------------------------------------------------------------------

/// Which LLM backend generates stage outputs.
///
/// `Local` requires `odp-llm` to be built with the `local` feature.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LlmBackendKind {
    /// Remote Ollama-compatible inference server.
    #[default]
    Ollama,
    /// In-process GGUF model.
    Local,
}

impl LlmBackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for LlmBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmBackendKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(Self::Ollama),
            "local" => Ok(Self::Local),
            other => Err(CoreError::UnknownVariant {
                kind: "llm backend",
                value: other.to_string(),
                expected: "ollama, local",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One step of the per-paper generation chain.
///
/// ```text
/// scenario → graph → odp
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scenario,
    Graph,
    Odp,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Self; 3] = [Self::Scenario, Self::Graph, Self::Odp];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Graph => "graph",
            Self::Odp => "odp",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
