//! crates/giftlink_client/src/pages/login.rs

use super::{unless_cancelled, Submit};
use crate::{
    api::GiftLinkApi,
    feedback::{Flash, InFlight},
    route::Route,
    session::{Session, SessionContext},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub const WRONG_PASSWORD: &str = "Wrong password. Try again.";
pub const LOGIN_FAILED: &str = "Login failed. Try again later.";
pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct LoginForm {
    email: String,
    password: String,
    flash: Option<Flash>,
}

pub struct LoginPage {
    api: Arc<dyn GiftLinkApi>,
    session: SessionContext,
    form: Mutex<LoginForm>,
    in_flight: InFlight,
    cancel: CancellationToken,
}

impl LoginPage {
    pub fn new(api: Arc<dyn GiftLinkApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            form: Mutex::new(LoginForm::default()),
            in_flight: InFlight::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Skips the form when the held token is still accepted by the server.
    pub async fn mount(&self) -> Option<Route> {
        if !self.session.has_token().await {
            return None;
        }
        let valid = unless_cancelled(&self.cancel, self.session.validate(self.api.as_ref())).await?;
        valid.then_some(Route::Home)
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        let mut form = self.form.lock().await;
        form.email = email.into();
        form.flash = None;
    }

    pub async fn set_password(&self, password: impl Into<String>) {
        let mut form = self.form.lock().await;
        form.password = password.into();
        form.flash = None;
    }

    pub async fn email(&self) -> String {
        self.form.lock().await.email.clone()
    }

    pub async fn password(&self) -> String {
        self.form.lock().await.password.clone()
    }

    pub async fn message(&self) -> Option<String> {
        let form = self.form.lock().await;
        form.flash.as_ref().and_then(Flash::visible).map(str::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn submit(&self) -> Submit {
        let Some(_slot) = self.in_flight.try_begin() else {
            return Submit::Busy;
        };
        let (email, password) = {
            let form = self.form.lock().await;
            (form.email.clone(), form.password.clone())
        };

        let Some(result) = unless_cancelled(&self.cancel, self.api.login(&email, &password)).await
        else {
            return Submit::Cancelled;
        };
        if self.cancel.is_cancelled() {
            return Submit::Cancelled;
        }

        match result {
            Ok(reply) => match reply.authtoken {
                Some(token) => {
                    self.session
                        .store(Session {
                            token,
                            name: reply.user_name.unwrap_or_default(),
                            email: reply.user_email.unwrap_or(email),
                        })
                        .await;
                    info!("Logged in");
                    Submit::Navigate(Route::Home)
                }
                None => {
                    let mut form = self.form.lock().await;
                    form.email.clear();
                    form.password.clear();
                    form.flash = Some(Flash::new(WRONG_PASSWORD, MESSAGE_LIFETIME));
                    Submit::Rejected
                }
            },
            Err(e) => {
                warn!("Login request failed: {}", e);
                self.form.lock().await.flash = Some(Flash::new(LOGIN_FAILED, MESSAGE_LIFETIME));
                Submit::Failed
            }
        }
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LoginPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
