use crate::component::QueryComponent;
use crate::config::{Configuration, QueryConfig};
use crate::query::Query;

/// Applies the configured minimum match, boost function and boost query.
///
/// Values are passed through verbatim. Syntax problems in them are reported by the
/// engine when the query runs.
#[derive(Debug, Clone, Default)]
pub struct RelevanceComponent {
    settings: QueryConfig,
}

impl RelevanceComponent {
    pub fn new(settings: QueryConfig) -> Self {
        Self { settings }
    }

    pub fn from_configuration(config: &dyn Configuration) -> Self {
        Self::new(QueryConfig {
            minimum_match: config.query_minimum_match(),
            boost_function: config.query_boost_function(),
            boost_query: config.query_boost_query(),
        })
    }
}

impl QueryComponent for RelevanceComponent {
    fn initialize(&self, query: &mut Query) {
        if let Some(mm) = non_empty(&self.settings.minimum_match) {
            query.set_minimum_match(mm);
        }
        if let Some(bf) = non_empty(&self.settings.boost_function) {
            query.set_boost_function(bf);
        }
        if let Some(bq) = non_empty(&self.settings.boost_query) {
            query.set_boost_query(bq);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
