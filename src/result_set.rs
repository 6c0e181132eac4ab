use async_trait::async_trait;
use std::sync::Arc;

use crate::data_models::{SearchRequest, SearchResultSet};
use crate::error::EngineError;
use crate::query_builder::QueryBuilder;
use crate::query_engine::SearchEngineClient;

/// Runs a full search for a request and returns the ranked page of documents.
#[async_trait]
pub trait SearchResultSetService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResultSet, EngineError>;
}

/// Builds the query through the [`QueryBuilder`] (and its component pipeline) and
/// executes it on the engine.
pub struct EngineResultSetService {
    query_builder: Arc<QueryBuilder>,
    engine: Arc<dyn SearchEngineClient>,
}

impl EngineResultSetService {
    pub fn new(query_builder: Arc<QueryBuilder>, engine: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            query_builder,
            engine,
        }
    }
}

#[async_trait]
impl SearchResultSetService for EngineResultSetService {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResultSet, EngineError> {
        let query = self.query_builder.build_search_query(request);
        let response = self.engine.search(&query).await?;
        log::debug!(
            "search for {:?} found {} documents, returning {}",
            request.raw_user_query(),
            response.num_found,
            response.documents.len()
        );
        Ok(SearchResultSet::new(response.documents, response.num_found))
    }
}
