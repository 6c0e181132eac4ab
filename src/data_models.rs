use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-owned search request. The core only reads it; sub-requests are new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    raw_query: String,
    page: usize,
    results_per_page: Option<usize>,
    additional_fields: Vec<String>,
    /// Restrictions every request in this context carries (language, site, access groups).
    context_filters: Vec<String>,
}

impl SearchRequest {
    pub fn new(raw_query: impl Into<String>) -> Self {
        Self {
            raw_query: raw_query.into(),
            ..Default::default()
        }
    }

    pub fn with_context_filters(mut self, filters: Vec<String>) -> Self {
        self.context_filters = filters;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn raw_user_query(&self) -> &str {
        &self.raw_query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn results_per_page(&self) -> Option<usize> {
        self.results_per_page
    }

    pub fn additional_fields(&self) -> &[String] {
        &self.additional_fields
    }

    pub fn context_filters(&self) -> &[String] {
        &self.context_filters
    }

    /// Derives a request in the same context for another query.
    ///
    /// Context filters carry over; paging and field selection start fresh.
    pub fn copy_for_sub_request(&self, raw_query: impl Into<String>) -> SearchRequest {
        SearchRequest {
            raw_query: raw_query.into(),
            page: 0,
            results_per_page: None,
            additional_fields: Vec::new(),
            context_filters: self.context_filters.clone(),
        }
    }

    pub fn set_results_per_page(&mut self, results_per_page: usize) {
        self.results_per_page = Some(results_per_page);
    }

    pub fn set_additional_fields(&mut self, fields: Vec<String>) {
        self.additional_fields = fields;
    }
}

/// One ranked document from a full search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    id: String,
    url: String,
    #[serde(rename = "type")]
    type_name: String,
    title: String,
    content: String,
    score: Option<f64>,
    /// Everything else the engine returned for the document.
    fields: Map<String, Value>,
}

impl SearchResult {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        type_name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            type_name: type_name.into(),
            title: title.into(),
            content: content.into(),
            score: None,
            fields: Map::new(),
        }
    }

    /// Builds a result from a raw engine document.
    ///
    /// Well-known fields are lifted out; multi-valued string fields use their first
    /// value.
    pub fn from_document(mut doc: Map<String, Value>) -> Self {
        let score = doc.remove("score").and_then(|v| v.as_f64());
        let mut take = |key: &str| doc.remove(key).map(first_string).unwrap_or_default();
        let id = take("id");
        let url = take("url");
        let type_name = take("type");
        let title = take("title");
        let content = take("content");

        Self {
            id,
            url,
            type_name,
            title,
            content,
            score,
            fields: doc,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

fn first_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(values) => values.into_iter().next().map(first_string).unwrap_or_default(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Ranked page of documents returned by a full search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultSet {
    results: Vec<SearchResult>,
    num_found: u64,
}

impl SearchResultSet {
    pub fn new(results: Vec<SearchResult>, num_found: u64) -> Self {
        Self { results, num_found }
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn num_found(&self) -> u64 {
        self.num_found
    }
}

/// Lightweight document shown next to suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopResultDocument {
    pub url: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub title: String,
    pub content: String,
}

impl From<&SearchResult> for TopResultDocument {
    fn from(result: &SearchResult) -> Self {
        Self {
            url: result.url().to_string(),
            type_name: result.type_name().to_string(),
            title: result.title().to_string(),
            content: result.content().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub suggestions: Vec<String>,
    /// The raw user input, echoed back untouched.
    pub suggestion: String,
    pub documents: Vec<TopResultDocument>,
    pub did_second_search: bool,
}

/// Outcome of an autosuggest call. Serializes either to the full suggestion record or
/// to `{"status": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionsResult {
    Found(Suggestions),
    Unavailable { status: bool },
}

impl SuggestionsResult {
    pub fn unavailable() -> Self {
        SuggestionsResult::Unavailable { status: false }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SuggestionsResult::Unavailable { .. })
    }

    pub fn suggestions(&self) -> Option<&Suggestions> {
        match self {
            SuggestionsResult::Found(found) => Some(found),
            SuggestionsResult::Unavailable { .. } => None,
        }
    }
}
