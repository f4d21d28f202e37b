//! services/api/src/web/search.rs
//!
//! The gift search endpoint.

use crate::{
    error::ApiError,
    web::{gifts::GiftResponse, state::AppState},
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use giftlink_core::query::GiftQuery;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::IntoParams;

/// Raw search parameters. Absent or empty values do not filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the gift name.
    pub name: Option<String>,
    /// Maximum age in years (inclusive).
    pub age_years: Option<String>,
    /// Exact category, e.g. `Kitchen`.
    pub category: Option<String>,
    /// Exact condition, e.g. `Like New`.
    pub condition: Option<String>,
}

/// GET /api/search - Filter gifts
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Gifts matching every supplied filter", body = [GiftResponse]),
        (status = 400, description = "Malformed filter value"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_gifts_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<GiftResponse>>, ApiError> {
    let Query(params) = params?;
    let query = GiftQuery::from_params(
        params.name.as_deref(),
        params.age_years.as_deref(),
        params.category.as_deref(),
        params.condition.as_deref(),
    )?;

    let gifts = state.db.search_gifts(&query).await?;
    debug!(?query, hits = gifts.len(), "Search completed");

    Ok(Json(gifts.into_iter().map(GiftResponse::from).collect()))
}
