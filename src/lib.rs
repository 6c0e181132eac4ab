pub mod api;
pub mod component;
pub mod config;
pub mod data_models;
pub mod error;
pub mod query;
pub mod query_builder;
pub mod query_engine;
pub mod relevance;
pub mod result_set;
pub mod solr;
pub mod suggest;
