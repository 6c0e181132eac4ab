use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Read-only view of the relevance and suggest settings.
///
/// `SuggestService` and `RelevanceComponent` only ever talk to this trait, so tests can
/// count which getters a code path touches.
pub trait Configuration: Send + Sync {
    fn suggest_show_top_results(&self) -> bool;
    fn suggest_number_of_top_results(&self) -> usize;
    fn suggest_additional_top_results_fields(&self) -> Vec<String>;
    fn suggest_field(&self) -> String;
    fn suggest_number_of_suggestions(&self) -> usize;
    fn suggest_treat_multiple_terms_as_single_term(&self) -> bool;

    /// `query.minimumMatch`
    fn query_minimum_match(&self) -> Option<String>;
    /// `query.boostFunction`
    fn query_boost_function(&self) -> Option<String>;
    /// `query.boostQuery`
    fn query_boost_query(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
    pub minimum_match: Option<String>,
    pub boost_function: Option<String>,
    pub boost_query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    pub suggest_field: String,
    pub number_of_suggestions: usize,
    pub show_top_results: bool,
    pub number_of_top_results: usize,
    pub additional_top_results_fields: Vec<String>,
    pub treat_multiple_terms_as_single_term: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            suggest_field: "spell".to_string(),
            number_of_suggestions: 10,
            show_top_results: false,
            number_of_top_results: 5,
            additional_top_results_fields: Vec::new(),
            treat_multiple_terms_as_single_term: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub solr_url: String,
    pub listen_addr: String,
    pub suggest: SuggestConfig,
    pub query: QueryConfig,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SuggestConfig::default();
        let solr_url = get_required(&lookup, "SOLR_URL")?;

        let suggest = SuggestConfig {
            suggest_field: get_or_default(&lookup, "SUGGEST_FIELD", &defaults.suggest_field),
            number_of_suggestions: parse_or_default(
                &lookup,
                "SUGGEST_NUMBER_OF_SUGGESTIONS",
                defaults.number_of_suggestions,
            )?,
            show_top_results: parse_or_default(
                &lookup,
                "SUGGEST_SHOW_TOP_RESULTS",
                defaults.show_top_results,
            )?,
            number_of_top_results: parse_or_default(
                &lookup,
                "SUGGEST_NUMBER_OF_TOP_RESULTS",
                defaults.number_of_top_results,
            )?,
            additional_top_results_fields: lookup("SUGGEST_ADDITIONAL_TOP_RESULTS_FIELDS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            treat_multiple_terms_as_single_term: parse_or_default(
                &lookup,
                "SUGGEST_TREAT_MULTIPLE_TERMS_AS_SINGLE_TERM",
                defaults.treat_multiple_terms_as_single_term,
            )?,
        };

        let query = QueryConfig {
            minimum_match: get_optional(&lookup, "QUERY_MINIMUM_MATCH"),
            boost_function: get_optional(&lookup, "QUERY_BOOST_FUNCTION"),
            boost_query: get_optional(&lookup, "QUERY_BOOST_QUERY"),
        };

        Ok(Config {
            solr_url,
            listen_addr: get_or_default(&lookup, "LISTEN_ADDR", "127.0.0.1:8080"),
            suggest,
            query,
        })
    }
}

impl Configuration for Config {
    fn suggest_show_top_results(&self) -> bool {
        self.suggest.show_top_results
    }

    fn suggest_number_of_top_results(&self) -> usize {
        self.suggest.number_of_top_results
    }

    fn suggest_additional_top_results_fields(&self) -> Vec<String> {
        self.suggest.additional_top_results_fields.clone()
    }

    fn suggest_field(&self) -> String {
        self.suggest.suggest_field.clone()
    }

    fn suggest_number_of_suggestions(&self) -> usize {
        self.suggest.number_of_suggestions
    }

    fn suggest_treat_multiple_terms_as_single_term(&self) -> bool {
        self.suggest.treat_multiple_terms_as_single_term
    }

    fn query_minimum_match(&self) -> Option<String> {
        self.query.minimum_match.clone()
    }

    fn query_boost_function(&self) -> Option<String> {
        self.query.boost_function.clone()
    }

    fn query_boost_query(&self) -> Option<String> {
        self.query.boost_query.clone()
    }
}

fn get_required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

// Empty strings count as unset; relevance settings are applied verbatim otherwise.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
