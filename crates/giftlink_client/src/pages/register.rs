//! crates/giftlink_client/src/pages/register.rs

use super::{unless_cancelled, Submit};
use crate::{
    api::{GiftLinkApi, RegisterBody},
    feedback::{Flash, InFlight},
    route::Route,
    session::{Session, SessionContext},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Try again later.";
pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct RegisterForm {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    flash: Option<Flash>,
}

pub struct RegisterPage {
    api: Arc<dyn GiftLinkApi>,
    session: SessionContext,
    form: Mutex<RegisterForm>,
    in_flight: InFlight,
    cancel: CancellationToken,
}

impl RegisterPage {
    pub fn new(api: Arc<dyn GiftLinkApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            form: Mutex::new(RegisterForm::default()),
            in_flight: InFlight::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn set_first_name(&self, value: impl Into<String>) {
        self.form.lock().await.first_name = value.into();
    }

    pub async fn set_last_name(&self, value: impl Into<String>) {
        self.form.lock().await.last_name = value.into();
    }

    pub async fn set_email(&self, value: impl Into<String>) {
        self.form.lock().await.email = value.into();
    }

    pub async fn set_password(&self, value: impl Into<String>) {
        self.form.lock().await.password = value.into();
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
        let (first_name, last_name, email, password) = {
            let form = self.form.lock().await;
            (
                form.first_name.clone(),
                form.last_name.clone(),
                form.email.clone(),
                form.password.clone(),
            )
        };
        let body = RegisterBody {
            first_name: &first_name,
            last_name: &last_name,
            email: &email,
            password: &password,
        };

        let Some(result) = unless_cancelled(&self.cancel, self.api.register(body)).await else {
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
                            name: first_name,
                            email: reply.email.unwrap_or(email),
                        })
                        .await;
                    info!("Registered new account");
                    Submit::Navigate(Route::Home)
                }
                None => {
                    let text = reply.error.unwrap_or_else(|| REGISTRATION_FAILED.to_string());
                    self.form.lock().await.flash = Some(Flash::new(text, MESSAGE_LIFETIME));
                    Submit::Rejected
                }
            },
            Err(e) => {
                warn!("Register request failed: {}", e);
                self.form.lock().await.flash =
                    Some(Flash::new(SOMETHING_WENT_WRONG, MESSAGE_LIFETIME));
                Submit::Failed
            }
        }
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for RegisterPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthReply;
    use crate::fake::FakeApi;

    async fn filled(api: FakeApi, session: SessionContext) -> RegisterPage {
        let page = RegisterPage::new(Arc::new(api), session);
        page.set_first_name("Ada").await;
        page.set_last_name("Lovelace").await;
        page.set_email("Ada@Example.com").await;
        page.set_password("secret1").await;
        page
    }

    #[tokio::test]
    async fn success_stores_first_name_and_returned_email() {
        let api = FakeApi::default();
        *api.register.lock().unwrap() = Ok(AuthReply {
            authtoken: Some("tok".to_string()),
            email: Some("ada@example.com".to_string()),
            ..AuthReply::default()
        });
        let session = SessionContext::new();
        let page = filled(api, session.clone()).await;

        assert_eq!(page.submit().await, Submit::Navigate(Route::Home));
        assert_eq!(
            session.current().await,
            Some(Session {
                token: "tok".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_text_is_shown_verbatim_for_three_seconds() {
        let api = FakeApi::default();
        *api.register.lock().unwrap() = Ok(AuthReply {
            error: Some("Email id already exists".to_string()),
            ..AuthReply::default()
        });
        let page = filled(api, SessionContext::new()).await;

        assert_eq!(page.submit().await, Submit::Rejected);
        assert_eq!(page.message().await.as_deref(), Some("Email id already exists"));

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(page.message().await.is_some());
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(page.message().await, None);
    }

    #[tokio::test]
    async fn missing_error_text_falls_back() {
        let page = filled(FakeApi::default(), SessionContext::new()).await;
        assert_eq!(page.submit().await, Submit::Rejected);
        assert_eq!(page.message().await.as_deref(), Some(REGISTRATION_FAILED));
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let api = FakeApi::default();
        *api.register.lock().unwrap() = Err(500);
        let session = SessionContext::new();
        let page = filled(api, session.clone()).await;

        assert_eq!(page.submit().await, Submit::Failed);
        assert_eq!(page.message().await.as_deref(), Some(SOMETHING_WENT_WRONG));
        assert!(session.current().await.is_none());
    }

    #[tokio::test]
    async fn teardown_cancels_the_pending_request() {
        let (api, _gate) = FakeApi::gated();
        let api = Arc::new(api);
        let page = Arc::new(RegisterPage::new(api.clone(), SessionContext::new()));

        let pending = tokio::spawn({
            let page = page.clone();
            async move { page.submit().await }
        });
        while api.calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(page.submit().await, Submit::Busy);

        page.teardown();
        assert_eq!(pending.await.unwrap(), Submit::Cancelled);
        assert!(!page.is_submitting());
    }
}
