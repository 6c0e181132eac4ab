use std::sync::Arc;

use crate::config::Configuration;
use crate::data_models::{SearchRequest, Suggestions, SuggestionsResult, TopResultDocument};
use crate::error::EngineError;
use crate::query_builder::{QueryBuilder, SuggestOptions};
use crate::query_engine::SearchEngineClient;
use crate::result_set::SearchResultSetService;

/// Autosuggest orchestration: a term lookup, optionally followed by a search for the
/// top documents.
///
/// Queries the engine cannot parse end in [`SuggestionsResult::Unavailable`]. Only
/// infrastructure failures are returned as errors.
pub struct SuggestService {
    config: Arc<dyn Configuration>,
    query_builder: Arc<QueryBuilder>,
    engine: Arc<dyn SearchEngineClient>,
    result_set_service: Arc<dyn SearchResultSetService>,
}

impl SuggestService {
    pub fn new(
        config: Arc<dyn Configuration>,
        query_builder: Arc<QueryBuilder>,
        engine: Arc<dyn SearchEngineClient>,
        result_set_service: Arc<dyn SearchResultSetService>,
    ) -> Self {
        Self {
            config,
            query_builder,
            engine,
            result_set_service,
        }
    }

    pub async fn get_suggestions(
        &self,
        request: &SearchRequest,
        options: &SuggestOptions,
    ) -> Result<SuggestionsResult, EngineError> {
        let raw_query = request.raw_user_query();
        let suggest_query = self.query_builder.build_suggest_query(raw_query, options);

        let terms = match self.engine.suggest(&suggest_query).await {
            Ok(terms) => terms,
            Err(EngineError::QuerySyntax(message)) => {
                log::warn!("suggest query {raw_query:?} rejected by engine: {message}");
                return Ok(SuggestionsResult::unavailable());
            }
            Err(e) => return Err(e),
        };

        if terms.is_empty() {
            return Ok(SuggestionsResult::unavailable());
        }

        let mut suggestions = Suggestions {
            suggestions: terms,
            suggestion: raw_query.to_string(),
            documents: Vec::new(),
            did_second_search: false,
        };

        if !self.config.suggest_show_top_results() {
            return Ok(SuggestionsResult::Found(suggestions));
        }

        suggestions.documents = self.top_results(request).await?;
        suggestions.did_second_search = true;
        Ok(SuggestionsResult::Found(suggestions))
    }

    async fn top_results(&self, request: &SearchRequest) -> Result<Vec<TopResultDocument>, EngineError> {
        let max_documents = self.config.suggest_number_of_top_results();
        let additional_fields = self.config.suggest_additional_top_results_fields();

        let mut sub_request = request.copy_for_sub_request(request.raw_user_query());
        sub_request.set_results_per_page(max_documents);
        sub_request.set_additional_fields(additional_fields);

        log::debug!(
            "fetching up to {max_documents} top results for {:?}",
            sub_request.raw_user_query()
        );

        // The full search parses the whole input, which the prefix lookup never did.
        let result_set = match self.result_set_service.search(&sub_request).await {
            Ok(result_set) => result_set,
            Err(EngineError::QuerySyntax(message)) => {
                log::warn!(
                    "top results query {:?} rejected by engine: {message}",
                    sub_request.raw_user_query()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(result_set
            .search_results()
            .iter()
            .take(max_documents)
            .map(TopResultDocument::from)
            .collect())
    }
}
