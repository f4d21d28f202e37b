//! crates/giftlink_client/src/app.rs
//!
//! The composition root. Owns the API handle and the session, and builds every
//! page with the same two.

use crate::{
    api::GiftLinkApi,
    error::ClientResult,
    http::HttpApi,
    pages::{DetailsPage, LoginPage, RegisterPage, SearchPage},
    session::SessionContext,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct App {
    api: Arc<dyn GiftLinkApi>,
    session: SessionContext,
}

impl App {
    pub fn new(api: Arc<dyn GiftLinkApi>) -> Self {
        Self {
            api,
            session: SessionContext::new(),
        }
    }

    /// An app talking HTTP to the backend at `base_url`.
    pub fn connect(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(HttpApi::new(base_url)?)))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.api.clone(), self.session.clone())
    }

    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(self.api.clone(), self.session.clone())
    }

    pub fn search_page(&self) -> SearchPage {
        SearchPage::new(self.api.clone())
    }

    pub fn details_page(&self, gift_id: impl Into<String>) -> DetailsPage {
        DetailsPage::new(self.api.clone(), gift_id)
    }

    pub async fn logout(&self) {
        self.session.logout(self.api.as_ref()).await;
    }
}
