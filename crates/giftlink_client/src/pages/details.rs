//! crates/giftlink_client/src/pages/details.rs

use super::unless_cancelled;
use crate::{
    api::{GiftLinkApi, GiftView},
    feedback::InFlight,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    Loading,
    Loaded(GiftView),
    NotFound,
    Failed,
}

pub struct DetailsPage {
    api: Arc<dyn GiftLinkApi>,
    gift_id: String,
    state: Mutex<DetailsState>,
    in_flight: InFlight,
    cancel: CancellationToken,
}

impl DetailsPage {
    pub fn new(api: Arc<dyn GiftLinkApi>, gift_id: impl Into<String>) -> Self {
        Self {
            api,
            gift_id: gift_id.into(),
            state: Mutex::new(DetailsState::Loading),
            in_flight: InFlight::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn gift_id(&self) -> &str {
        &self.gift_id
    }

    /// Fetches the gift. A repeated call while one is pending is a no-op.
    pub async fn mount(&self) -> DetailsState {
        let Some(_slot) = self.in_flight.try_begin() else {
            return self.state().await;
        };
        let Some(result) = unless_cancelled(&self.cancel, self.api.get_gift(&self.gift_id)).await
        else {
            return self.state().await;
        };
        if self.cancel.is_cancelled() {
            return self.state().await;
        }
        let next = match result {
            Ok(Some(gift)) => DetailsState::Loaded(gift),
            Ok(None) => DetailsState::NotFound,
            Err(e) => {
                warn!(gift_id = %self.gift_id, "Failed to load gift: {}", e);
                DetailsState::Failed
            }
        };
        *self.state.lock().await = next.clone();
        next
    }

    pub async fn state(&self) -> DetailsState {
        self.state.lock().await.clone()
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for DetailsPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
