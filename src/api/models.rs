use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub query: String,
    /// Extra filter queries for the term lookup.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Restrictions applied to the term lookup and to the top results search.
    #[serde(default)]
    pub context_filters: Vec<String>,
}
