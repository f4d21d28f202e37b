//! services/api/src/seed.rs
//!
//! Loads an initial gift catalogue into an empty collection at startup.

use crate::{error::ApiError, web::gifts::CreateGiftRequest};
use giftlink_core::{
    domain::{GiftDraft, NewGift},
    ports::{DatabaseService, PortError},
};
use std::path::Path;
use tracing::{info, warn};

/// Inserts every valid gift from the JSON array in `raw`. Returns how many were stored.
///
/// Entries that fail to decode or validate are skipped. Nothing is inserted
/// when the collection already holds gifts.
pub async fn seed_gifts_from_str(db: &dyn DatabaseService, raw: &str) -> Result<usize, ApiError> {
    let existing = db.count_gifts().await?;
    if existing > 0 {
        info!(existing, "Gift collection already populated, skipping seed");
        return Ok(0);
    }

    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)
        .map_err(|e| ApiError::Internal(format!("Seed file is not a JSON array: {}", e)))?;

    let mut inserted = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        let request = match serde_json::from_value::<CreateGiftRequest>(entry) {
            Ok(request) => request,
            Err(e) => {
                warn!(index, "Skipping undecodable seed gift: {}", e);
                continue;
            }
        };
        let new_gift = match NewGift::try_from(GiftDraft::from(request)) {
            Ok(gift) => gift,
            Err(e) => {
                warn!(index, "Skipping invalid seed gift: {}", e);
                continue;
            }
        };
        match db.insert_gift(new_gift).await {
            Ok(_) => inserted += 1,
            Err(PortError::Conflict(msg)) => {
                warn!(index, "Skipping duplicate seed gift: {}", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(inserted, "Seeded gift collection");
    Ok(inserted)
}

/// Reads `path` and seeds the collection from it.
pub async fn seed_gifts(db: &dyn DatabaseService, path: &Path) -> Result<usize, ApiError> {
    let raw = tokio::fs::read_to_string(path).await?;
    seed_gifts_from_str(db, &raw).await
}
