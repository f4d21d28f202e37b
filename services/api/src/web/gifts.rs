//! services/api/src/web/gifts.rs
//!
//! Handlers for the gift collection: list, fetch by id and create.

use crate::{error::ApiError, web::state::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use giftlink_core::domain::{Gift, GiftDraft, NewGift};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// A gift as returned by every read endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct GiftResponse {
    /// Public identifier, used by `GET /api/gifts/{id}`.
    pub id: String,
    /// Identifier assigned by the store.
    #[serde(rename = "_id")]
    pub document_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Living")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Like New")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
}

impl From<Gift> for GiftResponse {
    fn from(gift: Gift) -> Self {
        let a = gift.attributes;
        Self {
            id: gift.id,
            document_id: gift.document_id,
            name: a.name,
            category: a.category.map(|c| c.as_str().to_string()),
            condition: a.condition.map(|c| c.as_str().to_string()),
            age_days: a.age_days,
            age_years: a.age_years,
            description: a.description,
            image: a.image,
            posted_by: a.posted_by,
            zipcode: a.zipcode,
            date_added: a.date_added,
        }
    }
}

/// The create-gift payload. Only these fields are persisted.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateGiftRequest {
    /// Optional public identifier; the store's `_id` is used when omitted.
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub age_days: Option<i64>,
    pub age_years: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub posted_by: Option<String>,
    pub zipcode: Option<String>,
    /// Unix timestamp (seconds).
    pub date_added: Option<i64>,
}

impl From<CreateGiftRequest> for GiftDraft {
    fn from(req: CreateGiftRequest) -> Self {
        GiftDraft {
            id: req.id,
            name: req.name,
            category: req.category,
            condition: req.condition,
            age_days: req.age_days,
            age_years: req.age_years,
            description: req.description,
            image: req.image,
            posted_by: req.posted_by,
            zipcode: req.zipcode,
            date_added: req.date_added,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /api/gifts - List every gift
#[utoipa::path(
    get,
    path = "/api/gifts",
    responses(
        (status = 200, description = "All gifts", body = [GiftResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_gifts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GiftResponse>>, ApiError> {
    let gifts = state.db.list_gifts().await?;
    debug!("Listing {} gifts", gifts.len());
    Ok(Json(gifts.into_iter().map(GiftResponse::from).collect()))
}

/// GET /api/gifts/{id} - Fetch a single gift by its public id
#[utoipa::path(
    get,
    path = "/api/gifts/{id}",
    params(("id" = String, Path, description = "The gift's public id")),
    responses(
        (status = 200, description = "The gift", body = GiftResponse),
        (status = 404, description = "Gift not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_gift_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GiftResponse>, ApiError> {
    let gift = state.db.get_gift(&id).await?;
    Ok(Json(gift.into()))
}

/// POST /api/gifts - Create a gift listing
#[utoipa::path(
    post,
    path = "/api/gifts",
    request_body = CreateGiftRequest,
    responses(
        (status = 201, description = "Gift created", body = GiftResponse),
        (status = 400, description = "Invalid gift payload"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_gift_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateGiftRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let new_gift = NewGift::try_from(GiftDraft::from(req))?;

    let gift = state.db.insert_gift(new_gift).await?;
    info!(gift_id = %gift.id, "Gift created");

    Ok((StatusCode::CREATED, Json(GiftResponse::from(gift))))
}
