/// Structured search request, built up by the query pipeline and rendered into engine
/// parameters by [`Query::parameters`].
///
/// Relevance fields are `None` until a component sets them; nothing in this crate
/// clears them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    keywords: String,
    minimum_match: Option<String>,
    boost_function: Option<String>,
    boost_query: Option<String>,
    query_fields: Option<String>,
    alternative_query: Option<String>,
    filters: Vec<String>,
    fields: Vec<String>,
    rows: usize,
    start: usize,
}

pub const DEFAULT_ROWS: usize = 10;

impl Query {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            minimum_match: None,
            boost_function: None,
            boost_query: None,
            query_fields: None,
            alternative_query: None,
            filters: Vec::new(),
            fields: Vec::new(),
            rows: DEFAULT_ROWS,
            start: 0,
        }
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    pub fn minimum_match(&self) -> Option<&str> {
        self.minimum_match.as_deref()
    }

    pub fn set_minimum_match(&mut self, minimum_match: impl Into<String>) {
        self.minimum_match = Some(minimum_match.into());
    }

    pub fn boost_function(&self) -> Option<&str> {
        self.boost_function.as_deref()
    }

    pub fn set_boost_function(&mut self, boost_function: impl Into<String>) {
        self.boost_function = Some(boost_function.into());
    }

    pub fn boost_query(&self) -> Option<&str> {
        self.boost_query.as_deref()
    }

    pub fn set_boost_query(&mut self, boost_query: impl Into<String>) {
        self.boost_query = Some(boost_query.into());
    }

    pub fn query_fields(&self) -> Option<&str> {
        self.query_fields.as_deref()
    }

    pub fn set_query_fields(&mut self, query_fields: impl Into<String>) {
        self.query_fields = Some(query_fields.into());
    }

    pub fn alternative_query(&self) -> Option<&str> {
        self.alternative_query.as_deref()
    }

    pub fn set_alternative_query(&mut self, alternative_query: impl Into<String>) {
        self.alternative_query = Some(alternative_query.into());
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Adds a filter query unless the exact same filter is already present.
    pub fn add_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        if !filter.is_empty() && !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn add_field(&mut self, field: impl Into<String>) {
        let field = field.into();
        if !field.is_empty() && !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn set_start(&mut self, start: usize) {
        self.start = start;
    }

    /// Renders the query as engine request parameters, in a stable order.
    pub fn parameters(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![("defType".into(), "edismax".into())];

        if !self.keywords.trim().is_empty() {
            params.push(("q".into(), self.keywords.clone()));
        }
        if let Some(alt) = &self.alternative_query {
            params.push(("q.alt".into(), alt.clone()));
        }
        if let Some(qf) = &self.query_fields {
            params.push(("qf".into(), qf.clone()));
        }
        if let Some(mm) = &self.minimum_match {
            params.push(("mm".into(), mm.clone()));
        }
        if let Some(bf) = &self.boost_function {
            params.push(("bf".into(), bf.clone()));
        }
        if let Some(bq) = &self.boost_query {
            params.push(("bq".into(), bq.clone()));
        }
        for filter in &self.filters {
            params.push(("fq".into(), filter.clone()));
        }
        if !self.fields.is_empty() {
            params.push(("fl".into(), self.fields.join(",")));
        }
        params.push(("rows".into(), self.rows.to_string()));
        params.push(("start".into(), self.start.to_string()));
        params
    }
}

/// Prefix lookup against a facet field.
///
/// The raw input is split at its last space: the leading words become the keywords
/// of the inner [`Query`] and the trailing (partial) word becomes the facet prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestQuery {
    query: Query,
    raw: String,
    prefix: String,
    suggest_field: String,
    limit: usize,
}

impl SuggestQuery {
    pub fn new(
        raw: &str,
        suggest_field: impl Into<String>,
        limit: usize,
        treat_multiple_terms_as_single_term: bool,
    ) -> Self {
        let trimmed = raw.trim();
        let (keywords, partial) = if treat_multiple_terms_as_single_term {
            ("", trimmed)
        } else {
            split_last_term(trimmed)
        };

        let mut query = Query::new(keywords);
        query.set_alternative_query("*:*");
        query.set_rows(0);

        Self {
            query,
            raw: raw.to_string(),
            prefix: partial.to_lowercase(),
            suggest_field: suggest_field.into(),
            limit,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    /// The user input exactly as it was handed in.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suggest_field(&self) -> &str {
        &self.suggest_field
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn parameters(&self) -> Vec<(String, String)> {
        let mut params = self.query.parameters();
        params.extend([
            ("facet".to_string(), "on".to_string()),
            ("facet.prefix".to_string(), self.prefix.clone()),
            ("facet.field".to_string(), self.suggest_field.clone()),
            ("facet.limit".to_string(), self.limit.to_string()),
            ("facet.mincount".to_string(), "1".to_string()),
            ("facet.sort".to_string(), "count".to_string()),
        ]);
        params
    }
}

fn split_last_term(input: &str) -> (&str, &str) {
    match input.rfind(' ') {
        Some(idx) => (input[..idx].trim(), &input[idx + 1..]),
        None => ("", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_new_query_has_no_relevance_settings() {
        let query = Query::new("solr");
        assert_eq!(query.minimum_match(), None);
        assert_eq!(query.boost_function(), None);
        assert_eq!(query.boost_query(), None);

        let params = query.parameters();
        assert!(param(&params, "mm").is_empty());
        assert!(param(&params, "bf").is_empty());
        assert!(param(&params, "bq").is_empty());
        assert_eq!(param(&params, "q"), vec!["solr"]);
        assert_eq!(param(&params, "rows"), vec!["10"]);
    }

    #[test]
    fn test_parameters_include_relevance_filters_and_fields() {
        let mut query = Query::new("hello world");
        query.set_minimum_match("2<-25%");
        query.set_boost_function("log(views)");
        query.set_boost_query("type:pages^2");
        query.add_filter("language:0");
        query.add_filter("language:0");
        query.add_filter("siteHash:abc");
        query.add_field("title");
        query.add_field("url");
        query.add_field("title");

        let params = query.parameters();
        assert_eq!(param(&params, "mm"), vec!["2<-25%"]);
        assert_eq!(param(&params, "bf"), vec!["log(views)"]);
        assert_eq!(param(&params, "bq"), vec!["type:pages^2"]);
        assert_eq!(param(&params, "fq"), vec!["language:0", "siteHash:abc"]);
        assert_eq!(param(&params, "fl"), vec!["title,url"]);
    }

    #[test]
    fn test_suggest_query_splits_last_term() {
        let query = SuggestQuery::new("hello Wor", "spell", 10, false);
        assert_eq!(query.query().keywords(), "hello");
        assert_eq!(query.prefix(), "wor");
        assert_eq!(query.raw(), "hello Wor");
    }

    #[test]
    fn test_suggest_query_single_term() {
        let query = SuggestQuery::new("ty", "spell", 10, false);
        assert_eq!(query.query().keywords(), "");
        assert_eq!(query.prefix(), "ty");

        let params = query.parameters();
        assert!(param(&params, "q").is_empty());
        assert_eq!(param(&params, "q.alt"), vec!["*:*"]);
        assert_eq!(param(&params, "rows"), vec!["0"]);
        assert_eq!(param(&params, "facet.prefix"), vec!["ty"]);
        assert_eq!(param(&params, "facet.field"), vec!["spell"]);
        assert_eq!(param(&params, "facet.limit"), vec!["10"]);
    }

    #[test]
    fn test_suggest_query_treats_multiple_terms_as_single_term() {
        let query = SuggestQuery::new("new york ci", "spell", 5, true);
        assert_eq!(query.query().keywords(), "");
        assert_eq!(query.prefix(), "new york ci");
    }

    #[test]
    fn test_suggest_query_ignores_trailing_whitespace() {
        let query = SuggestQuery::new("hello world  ", "spell", 5, false);
        assert_eq!(query.query().keywords(), "hello");
        assert_eq!(query.prefix(), "world");
        assert_eq!(query.raw(), "hello world  ");
    }
}
