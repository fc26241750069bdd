//! # odp-core
//!
//! Core types shared by every text2odp crate:
//! - Entity structs for each pipeline stage (paper, scenario, graph, ODP,
//!   evaluation) plus the persisted per-paper records
//! - Enums for paper sources, LLM backends, and generation stages
//! - Cross-cutting error types
//!
//! Every entity is a plain value object. Stage outputs derive `JsonSchema`
//! so `odp-schema` can validate raw model output before deserialization.

pub mod entities;
pub mod enums;
pub mod errors;
