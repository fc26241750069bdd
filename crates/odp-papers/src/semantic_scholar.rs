//! Semantic Scholar Graph API client.

use std::time::Duration;

use odp_config::SearchConfig;
use odp_core::entities::PaperRecord;
use odp_core::enums::PaperSource;

use crate::PaperCollector;
use crate::error::SearchError;
use crate::http::check_response;

/// The Graph API rejects larger pages.
const MAX_PAGE_SIZE: u32 = 100;

const FIELDS: &str = "title,abstract,year,venue";

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperItem>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperItem {
    paper_id: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    venue: Option<String>,
    year: Option<i32>,
}

impl PaperItem {
    /// `None` unless both title and abstract are present and non-empty.
    fn into_record(self) -> Option<PaperRecord> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let abstract_text = self.abstract_text.filter(|a| !a.is_empty())?;
        Some(PaperRecord {
            paper_id: self.paper_id.unwrap_or_else(|| title.clone()),
            title,
            abstract_text,
            venue: self.venue,
            year: self.year,
            source: PaperSource::SemanticScholar,
        })
    }
}

fn into_records(response: SearchResponse) -> Vec<PaperRecord> {
    response
        .data
        .into_iter()
        .filter_map(PaperItem::into_record)
        .collect()
}

/// HTTP client for the Semantic Scholar paper search endpoint.
pub struct SemanticScholarClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SemanticScholarClient {
    /// Create a client for `endpoint`
    /// (e.g. `https://api.semanticscholar.org/graph/v1/paper/search`).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent("text2odp/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: None,
        })
    }

    /// Create a client from the `[search]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(match config.api_key() {
            Some(key) => client.with_api_key(key),
            None => client,
        })
    }

    /// Send `key` as the `x-api-key` header on every request.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn search_url(&self, query: &str, limit: u32) -> String {
        format!(
            "{}?query={}&limit={}&fields={FIELDS}",
            self.endpoint,
            urlencoding::encode(query),
            limit.min(MAX_PAGE_SIZE)
        )
    }
}

impl PaperCollector for SemanticScholarClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        let url = self.search_url(query, limit);
        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let resp = check_response(request.send().await?).await?;

        let body = resp.text().await?;
        let data: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))?;
        let returned = data.data.len();
        let papers = into_records(data);
        tracing::info!(
            query,
            returned,
            kept = papers.len(),
            "semantic scholar search complete"
        );
        Ok(papers)
    }
}
