use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use tunesearch::api::create_router;
use tunesearch::config::{Config, Configuration};
use tunesearch::query_builder::QueryBuilder;
use tunesearch::query_engine::SearchEngineClient;
use tunesearch::result_set::EngineResultSetService;
use tunesearch::solr::SolrClient;
use tunesearch::suggest::SuggestService;

#[derive(Parser, Debug)]
#[command(about = "Autosuggest service in front of a Solr core")]
struct Args {
    /// Address to listen on, overrides LISTEN_ADDR.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The fmt subscriber also picks up records from the log crate.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = Arc::new(Config::from_env()?);
    let listen_addr = args.listen.unwrap_or_else(|| config.listen_addr.clone());

    let engine: Arc<dyn SearchEngineClient> = Arc::new(SolrClient::new(&config.solr_url)?);
    let query_builder = Arc::new(QueryBuilder::from_configuration(config.as_ref()));
    let result_set_service = Arc::new(EngineResultSetService::new(
        query_builder.clone(),
        engine.clone(),
    ));
    let configuration: Arc<dyn Configuration> = config.clone();
    let suggest_service = Arc::new(SuggestService::new(
        configuration,
        query_builder,
        engine,
        result_set_service,
    ));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    log::info!("suggest service listening on {listen_addr}, solr at {}", config.solr_url);

    axum::serve(listener, create_router(suggest_service))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
