use anyhow::Result;

use tunesearch::component::QueryComponent;
use tunesearch::config::{Config, QueryConfig};
use tunesearch::data_models::SearchRequest;
use tunesearch::query::Query;
use tunesearch::query_builder::QueryBuilder;
use tunesearch::relevance::RelevanceComponent;

mod test_helpers {
    use super::*;
    use std::collections::HashMap;

    pub fn settings(mm: Option<&str>, bf: Option<&str>, bq: Option<&str>) -> QueryConfig {
        QueryConfig {
            minimum_match: mm.map(String::from),
            boost_function: bf.map(String::from),
            boost_query: bq.map(String::from),
        }
    }

    pub fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }
}

use test_helpers::*;

#[test]
fn test_query_is_unmodified_without_configuration() {
    let component = RelevanceComponent::new(QueryConfig::default());

    let mut query = Query::new("hello world");
    query.add_filter("language:0");
    let before = query.clone();

    component.initialize(&mut query);
    assert_eq!(query, before);
}

#[test]
fn test_applies_all_settings_verbatim() {
    let component = RelevanceComponent::new(settings(
        Some("2<-25% 9<-3"),
        Some("recip(ms(NOW,created),3.16e-11,1,1)"),
        Some("type:pages^2.0"),
    ));

    let mut query = Query::new("hello world");
    component.initialize(&mut query);

    assert_eq!(query.minimum_match(), Some("2<-25% 9<-3"));
    assert_eq!(query.boost_function(), Some("recip(ms(NOW,created),3.16e-11,1,1)"));
    assert_eq!(query.boost_query(), Some("type:pages^2.0"));
    assert_eq!(query.keywords(), "hello world");
}

#[test]
fn test_empty_values_are_ignored() {
    let component = RelevanceComponent::new(settings(Some(""), Some("sum(views,1)"), Some("")));

    let mut query = Query::new("solr");
    component.initialize(&mut query);

    assert_eq!(query.minimum_match(), None);
    assert_eq!(query.boost_function(), Some("sum(views,1)"));
    assert_eq!(query.boost_query(), None);
}

#[test]
fn test_unset_values_do_not_clear_existing_ones() {
    let component = RelevanceComponent::new(settings(None, Some("log(views)"), None));

    let mut query = Query::new("solr");
    query.set_minimum_match("100%");
    query.set_boost_query("type:news");
    component.initialize(&mut query);

    assert_eq!(query.minimum_match(), Some("100%"));
    assert_eq!(query.boost_function(), Some("log(views)"));
    assert_eq!(query.boost_query(), Some("type:news"));
}

#[test]
fn test_malformed_boost_is_passed_through() {
    let component = RelevanceComponent::new(settings(None, Some("recip(ms(NOW,created"), None));

    let mut query = Query::new("solr");
    component.initialize(&mut query);
    assert_eq!(query.boost_function(), Some("recip(ms(NOW,created"));
}

#[test]
fn test_component_reads_query_namespace_from_configuration() -> Result<()> {
    let config = config_from(&[
        ("SOLR_URL", "http://localhost:8983/solr/core_en"),
        ("QUERY_MINIMUM_MATCH", "75%"),
        ("QUERY_BOOST_QUERY", "type:pages^3"),
    ])?;
    let component = RelevanceComponent::from_configuration(&config);

    let mut query = Query::new("solr");
    component.initialize(&mut query);

    assert_eq!(query.minimum_match(), Some("75%"));
    assert_eq!(query.boost_function(), None);
    assert_eq!(query.boost_query(), Some("type:pages^3"));
    Ok(())
}

#[test]
fn test_query_builder_registers_relevance_component() -> Result<()> {
    let config = config_from(&[
        ("SOLR_URL", "http://localhost:8983/solr/core_en"),
        ("QUERY_BOOST_FUNCTION", "log(views)"),
    ])?;
    let builder = QueryBuilder::from_configuration(&config);
    assert_eq!(builder.pipeline().len(), 1);

    let query = builder.build_search_query(&SearchRequest::new("solr"));
    assert_eq!(query.boost_function(), Some("log(views)"));

    let bf: Vec<String> = query
        .parameters()
        .into_iter()
        .filter(|(k, _)| k == "bf")
        .map(|(_, v)| v)
        .collect();
    assert_eq!(bf, vec!["log(views)"]);
    Ok(())
}

#[test]
fn test_suggest_queries_skip_the_pipeline() -> Result<()> {
    let config = config_from(&[
        ("SOLR_URL", "http://localhost:8983/solr/core_en"),
        ("QUERY_MINIMUM_MATCH", "100%"),
    ])?;
    let builder = QueryBuilder::from_configuration(&config);

    let suggest_query = builder.build_suggest_query("hello wo", &Default::default());
    assert_eq!(suggest_query.query().minimum_match(), None);
    Ok(())
}
