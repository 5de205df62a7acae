use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    application::dto::{
        CreateItemRequest, HealthResponse, ItemsPageResponse, ListItemsQueryRequest,
    },
    domain::{item::Item, stats::Stats},
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListItemsQueryRequest>,
) -> ApiResult<Json<ItemsPageResponse>> {
    let correlation_id = request_correlation_id(&headers);
    let page = state
        .catalog
        .list_items(query)
        .await
        .map_err(|error| ApiProblem::from_domain_with_correlation(error, correlation_id))?;
    Ok(Json(page))
}

pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let correlation_id = request_correlation_id(&headers);
    let item = state
        .catalog
        .get_item(&id)
        .await
        .map_err(|error| ApiProblem::from_domain_with_correlation(error, correlation_id))?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let correlation_id = request_correlation_id(&headers);
    let created = state
        .catalog
        .create_item(request)
        .await
        .map_err(|error| ApiProblem::from_domain_with_correlation(error, correlation_id))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Stats>> {
    let correlation_id = request_correlation_id(&headers);
    let stats = state
        .stats
        .get()
        .await
        .map_err(|error| ApiProblem::from_domain_with_correlation(error, correlation_id))?;
    Ok(Json(stats))
}

fn request_correlation_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
