use async_trait::async_trait;

use crate::data_models::SearchResult;
use crate::error::EngineError;
use crate::query::{Query, SuggestQuery};

/// Documents returned by the engine for one query, in ranked order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResponse {
    pub num_found: u64,
    pub documents: Vec<SearchResult>,
}

/// Executes queries against the search engine.
///
/// Implementations must report a query the engine cannot parse as
/// [`EngineError::QuerySyntax`], and a valid query without matches as an empty
/// `Ok` value.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Runs a prefix lookup and returns the suggested terms in engine order.
    async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<String>, EngineError>;

    async fn search(&self, query: &Query) -> Result<EngineResponse, EngineError>;
}
