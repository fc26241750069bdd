//! # odp-pipeline
//!
//! Turns a paper query into evaluated Ontology Design Patterns.
//!
//! For every collected paper the [`Generator`] runs three LLM stages
//! (scenario + competency questions → concept/relation graph → ODP), each
//! validated against its schema before the next begins. The [`Pipeline`]
//! scores each paper with `odp-eval` and persists the run through a
//! [`RunStore`].
//!
//! ```text
//! PaperCollector ─► dataset.jsonl
//!        │
//!        ▼
//!   Generator (scenario → graph → odp) ─► evaluate ─► artifacts.json
//!                                                     evaluation.csv
//!                                                     evaluation_summary.json
//! ```

mod error;
mod generator;
pub mod prompts;
mod runner;
mod store;

pub use error::PipelineError;
pub use generator::{Generation, Generator};
pub use runner::{Pipeline, RunEvent, RunReport};
pub use store::{
    ARTIFACTS_FILE, DATASET_FILE, EVALUATION_FILE, FAILURES_FILE, RunStore, SUMMARY_FILE,
};
