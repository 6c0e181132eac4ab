use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::data_models::SearchResult;
use crate::error::EngineError;
use crate::query::{Query, SuggestQuery};
use crate::query_engine::{EngineResponse, SearchEngineClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`SearchEngineClient`] for a Solr core, using the `/select` handler and the JSON
/// response writer.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: Client,
    select_url: Url,
}

impl SolrClient {
    /// `base_url` points at the core, e.g. `http://localhost:8983/solr/core_en`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let select_url = Url::parse(&base)
            .and_then(|u| u.join("select"))
            .with_context(|| format!("Invalid Solr URL: {base_url}"))?;

        Ok(Self { http, select_url })
    }

    pub fn select_url(&self) -> &Url {
        &self.select_url
    }

    async fn select(&self, params: Vec<(String, String)>) -> Result<Value, EngineError> {
        let res = self
            .http
            .get(self.select_url.clone())
            .query(&params)
            .query(&[("wt", "json"), ("json.nl", "arrarr")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SearchEngineClient for SolrClient {
    async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<String>, EngineError> {
        let body = self.select(query.parameters()).await?;
        Ok(parse_facet_terms(&body, query.suggest_field()))
    }

    async fn search(&self, query: &Query) -> Result<EngineResponse, EngineError> {
        let body = self.select(query.parameters()).await?;
        Ok(parse_documents(&body))
    }
}

/// Maps a non-2xx Solr response to an [`EngineError`].
///
/// Parser failures come back as 400 with the parser exception in `error.msg`.
pub fn classify_error(status: u16, body: &str) -> EngineError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/msg").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.chars().take(512).collect());

    let is_syntax = status == 400
        && (message.contains("SyntaxError")
            || message.contains("Cannot parse")
            || message.contains("undefined field"));

    if is_syntax {
        EngineError::QuerySyntax(message)
    } else {
        EngineError::Status { status, message }
    }
}

/// Reads facet terms for `field` in engine order. Accepts both `arrarr` and `flat`
/// named-list layouts.
pub fn parse_facet_terms(body: &Value, field: &str) -> Vec<String> {
    let Some(entries) = body
        .pointer("/facet_counts/facet_fields")
        .and_then(|fields| fields.get(field))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    match entries.first() {
        Some(Value::Array(_)) => entries
            .iter()
            .filter_map(|pair| pair.get(0).and_then(Value::as_str))
            .map(String::from)
            .collect(),
        Some(Value::String(_)) => entries
            .iter()
            .step_by(2)
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

pub fn parse_documents(body: &Value) -> EngineResponse {
    let num_found = body
        .pointer("/response/numFound")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let documents = body
        .pointer("/response/docs")
        .and_then(Value::as_array)
        .map(|docs| {
            docs.iter()
                .filter_map(|doc| doc.as_object().cloned())
                .map(SearchResult::from_document)
                .collect()
        })
        .unwrap_or_default();

    EngineResponse {
        num_found,
        documents,
    }
}
