use serde::Deserialize;

use crate::component::{QueryComponent, QueryPipeline};
use crate::config::Configuration;
use crate::data_models::SearchRequest;
use crate::query::{DEFAULT_ROWS, Query, SuggestQuery};
use crate::relevance::RelevanceComponent;

/// Fields every full search returns, additional fields are appended after these.
pub const DEFAULT_RESULT_FIELDS: [&str; 6] = ["id", "url", "type", "title", "content", "score"];

/// Per-call options for a suggest lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestOptions {
    #[serde(default)]
    pub additional_filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestSettings {
    pub suggest_field: String,
    pub number_of_suggestions: usize,
    pub treat_multiple_terms_as_single_term: bool,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            suggest_field: "spell".to_string(),
            number_of_suggestions: 10,
            treat_multiple_terms_as_single_term: false,
        }
    }
}

/// Builds engine queries from user input. Construction never does I/O.
pub struct QueryBuilder {
    suggest: SuggestSettings,
    pipeline: QueryPipeline,
}

impl QueryBuilder {
    pub fn new(suggest: SuggestSettings, pipeline: QueryPipeline) -> Self {
        Self { suggest, pipeline }
    }

    /// Snapshots the suggest settings and registers the relevance component.
    pub fn from_configuration(config: &dyn Configuration) -> Self {
        let suggest = SuggestSettings {
            suggest_field: config.suggest_field(),
            number_of_suggestions: config.suggest_number_of_suggestions(),
            treat_multiple_terms_as_single_term: config.suggest_treat_multiple_terms_as_single_term(),
        };
        let components: Vec<Box<dyn QueryComponent>> =
            vec![Box::new(RelevanceComponent::from_configuration(config))];
        Self::new(suggest, QueryPipeline::new(components))
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn build_suggest_query(&self, raw_query: &str, options: &SuggestOptions) -> SuggestQuery {
        let mut query = SuggestQuery::new(
            raw_query,
            self.suggest.suggest_field.clone(),
            self.suggest.number_of_suggestions,
            self.suggest.treat_multiple_terms_as_single_term,
        );
        for filter in &options.additional_filters {
            query.query_mut().add_filter(filter.clone());
        }
        query
    }

    pub fn build_search_query(&self, request: &SearchRequest) -> Query {
        let rows = request.results_per_page().unwrap_or(DEFAULT_ROWS);

        let mut query = Query::new(request.raw_user_query().trim());
        query.set_rows(rows);
        query.set_start(request.page() * rows);
        for field in DEFAULT_RESULT_FIELDS {
            query.add_field(field);
        }
        for field in request.additional_fields() {
            query.add_field(field.clone());
        }
        for filter in request.context_filters() {
            query.add_filter(filter.clone());
        }

        self.pipeline.apply(&mut query);
        query
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(SuggestSettings::default(), QueryPipeline::default())
    }
}
