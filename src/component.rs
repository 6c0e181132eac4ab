use crate::query::Query;

/// A query-building step. Components receive the in-flight query from the pipeline
/// that owns it and mutate it in place.
pub trait QueryComponent: Send + Sync {
    fn initialize(&self, query: &mut Query);
}

/// Ordered list of components applied to every full search query.
#[derive(Default)]
pub struct QueryPipeline {
    components: Vec<Box<dyn QueryComponent>>,
}

impl QueryPipeline {
    pub fn new(components: Vec<Box<dyn QueryComponent>>) -> Self {
        Self { components }
    }

    pub fn push(&mut self, component: Box<dyn QueryComponent>) {
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Runs every component over `query`, in registration order.
    pub fn apply(&self, query: &mut Query) {
        for component in self.components.iter() {
            component.initialize(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AppendKeyword(&'static str);

    impl QueryComponent for AppendKeyword {
        fn initialize(&self, query: &mut Query) {
            let keywords = format!("{} {}", query.keywords(), self.0);
            query.set_keywords(keywords.trim());
        }
    }

    #[test]
    fn test_components_run_in_registration_order() {
        let mut pipeline = QueryPipeline::new(vec![Box::new(AppendKeyword("a"))]);
        pipeline.push(Box::new(AppendKeyword("b")));
        pipeline.push(Box::new(AppendKeyword("c")));
        assert_eq!(pipeline.len(), 3);

        let mut query = Query::new("");
        pipeline.apply(&mut query);
        assert_eq!(query.keywords(), "a b c");
    }

    #[test]
    fn test_empty_pipeline_leaves_query_untouched() {
        let pipeline = QueryPipeline::default();
        assert!(pipeline.is_empty());

        let mut query = Query::new("solr");
        let before = query.clone();
        pipeline.apply(&mut query);
        assert_eq!(query, before);
    }
}
