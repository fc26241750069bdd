//! # odp-papers
//!
//! Paper search for text2odp. A [`PaperCollector`] turns a free-text query
//! into [`PaperRecord`]s that carry both a title and an abstract; records
//! without either are dropped at the source.
//!
//! - [`SemanticScholarClient`]: the Semantic Scholar Graph API

mod error;
mod http;
mod semantic_scholar;

use std::future::Future;

pub use error::SearchError;
pub use semantic_scholar::SemanticScholarClient;

use odp_core::entities::PaperRecord;

/// A source of paper abstracts.
pub trait PaperCollector: Send + Sync {
    /// Return up to `limit` papers matching `query`, each with a non-empty
    /// title and abstract.
    fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<PaperRecord>, SearchError>> + Send;
}
