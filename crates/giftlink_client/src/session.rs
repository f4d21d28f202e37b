//! crates/giftlink_client/src/session.rs
//!
//! The explicit client session. One `SessionContext` is created by the `App`
//! root and handed to every page; nothing reads login state from anywhere else.

use crate::api::GiftLinkApi;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// What the client remembers about a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub email: String,
}

/// Shared handle to the current session, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }

    /// True when a token is held. Not proof that the server still accepts it; see `validate`.
    pub async fn has_token(&self) -> bool {
        self.inner.read().await.is_some()
    }

    pub async fn store(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Asks the server whether the held token is still valid.
    ///
    /// A rejected token is dropped. A transport failure leaves the session
    /// untouched but is not treated as valid.
    pub async fn validate(&self, api: &dyn GiftLinkApi) -> bool {
        let Some(token) = self.token().await else {
            return false;
        };
        match api.current_user(&token).await {
            Ok(Some(profile)) => {
                let mut guard = self.inner.write().await;
                if let Some(session) = guard.as_mut().filter(|s| s.token == token) {
                    session.name = profile.user_name;
                    session.email = profile.user_email;
                    return true;
                }
                false
            }
            Ok(None) => {
                info!("Stored token was rejected by the server; clearing session");
                let mut guard = self.inner.write().await;
                if guard.as_ref().is_some_and(|s| s.token == token) {
                    *guard = None;
                }
                false
            }
            Err(e) => {
                warn!("Could not validate session: {}", e);
                false
            }
        }
    }

    /// Revokes the token server-side and forgets the session locally either way.
    pub async fn logout(&self, api: &dyn GiftLinkApi) {
        let Some(token) = self.token().await else {
            return;
        };
        if let Err(e) = api.logout(&token).await {
            warn!("Logout request failed: {}", e);
        }
        self.clear().await;
    }
}
