use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skyroute_core::{SearchComparison, SearchParams};
use skyroute_store::{RedisClient, RouteSummary, SearchHistoryEntry};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_id: Uuid,
    pub params: SearchParams,
    #[serde(flatten)]
    pub results: SearchComparison,
    pub searched_at: DateTime<Utc>,
    pub search_duration_ms: u64,
    pub cached: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteHistoryQuery {
    pub id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/search-history", get(search_history).delete(delete_history))
        .route("/v1/search-history/popular", get(popular_routes))
}

fn history_store(state: &AppState) -> Result<&RedisClient, AppError> {
    state
        .redis
        .as_deref()
        .ok_or_else(|| AppError::ServiceUnavailable("Search history is not configured".to_string()))
}

/// POST /v1/flights/search
pub async fn search_flights(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    params.validate()?;

    if let Some(redis) = &state.redis {
        match redis.get_cached_results::<SearchResponse>(&params).await {
            Ok(Some(mut hit)) => {
                info!("Returning cached results for {} -> {}", params.origin, params.destination);
                hit.cached = true;
                return Ok(Json(hit));
            }
            Ok(None) => {}
            Err(e) => warn!("Results cache lookup failed: {}", e),
        }
    }

    let started = Instant::now();
    let results = if params.include_creative_routing {
        state.engine.compare_with_creative_routing(&params).await?
    } else {
        SearchComparison {
            direct_flights: state.engine.search_all_apis(&params).await?,
            ..Default::default()
        }
    };

    let response = SearchResponse {
        search_id: Uuid::new_v4(),
        params,
        results,
        searched_at: Utc::now(),
        search_duration_ms: started.elapsed().as_millis() as u64,
        cached: false,
    };

    if let Some(redis) = &state.redis {
        if let Err(e) = redis
            .cache_results(&response.params, &response, state.search.results_cache_ttl_seconds)
            .await
        {
            warn!("Failed to cache search results: {}", e);
        }

        let entry = SearchHistoryEntry {
            search_id: response.search_id.to_string(),
            params: response.params.clone(),
            results_count: response.results.direct_flights.len() + response.results.creative_routes.len(),
            cheapest_price: response.results.direct_flights.first().map(|r| r.price_amount),
            searched_at: response.searched_at,
        };
        if let Err(e) = redis.push_search_history(&entry, state.search.history_capacity).await {
            warn!("Failed to record search history: {}", e);
        }
    }

    Ok(Json(response))
}

/// GET /v1/search-history?limit=N
pub async fn search_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SearchHistoryEntry>>, AppError> {
    let redis = history_store(&state)?;

    let limit = query.limit.unwrap_or(10);
    if limit > state.search.history_capacity {
        return Err(AppError::ValidationError(format!(
            "limit must be at most {}",
            state.search.history_capacity
        )));
    }

    Ok(Json(redis.recent_search_history(limit).await?))
}

/// GET /v1/search-history/popular?limit=N
pub async fn popular_routes(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<RouteSummary>>, AppError> {
    let redis = history_store(&state)?;
    Ok(Json(redis.popular_routes(query.limit.unwrap_or(5)).await?))
}

/// DELETE /v1/search-history[?id=ID]
pub async fn delete_history(
    State(state): State<AppState>,
    Query(query): Query<DeleteHistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let redis = history_store(&state)?;

    match query.id {
        Some(id) => {
            if !redis.delete_search(&id).await? {
                return Err(AppError::NotFoundError(format!("No search {} in history", id)));
            }
            Ok(Json(json!({ "message": "Search deleted" })))
        }
        None => {
            redis.clear_search_history().await?;
            Ok(Json(json!({ "message": "History cleared" })))
        }
    }
}
