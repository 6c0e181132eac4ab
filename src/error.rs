use thiserror::Error;

/// Failures reported by a search engine client.
///
/// `QuerySyntax` is about the query content and is recoverable by callers that deal
/// with user input. Everything else is an infrastructure failure.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("query rejected by search engine: {0}")]
    QuerySyntax(String),

    #[error("search engine responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("search engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode search engine response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EngineError {
    pub fn is_query_syntax(&self) -> bool {
        matches!(self, EngineError::QuerySyntax(_))
    }
}
