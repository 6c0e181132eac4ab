use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::{SearchRequest, SuggestionsResult};
use crate::query_builder::SuggestOptions;
use crate::suggest::SuggestService;

use super::models::SuggestRequest;

pub async fn suggest_handler(
    State(suggest_service): State<Arc<SuggestService>>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestionsResult>, (StatusCode, String)> {
    let start = Instant::now();

    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let mut additional_filters = request.context_filters.clone();
    additional_filters.extend(request.filters);
    let options = SuggestOptions { additional_filters };
    let search_request = SearchRequest::new(request.query).with_context_filters(request.context_filters);

    let result = suggest_service
        .get_suggestions(&search_request, &options)
        .await
        .map_err(|e| {
            log::error!("suggest failed for {:?}: {:#}", search_request.raw_user_query(), e);
            (StatusCode::BAD_GATEWAY, format!("Search engine error: {}", e))
        })?;

    log::info!(
        "suggest {:?} answered in {}ms",
        search_request.raw_user_query(),
        start.elapsed().as_millis()
    );

    Ok(Json(result))
}
