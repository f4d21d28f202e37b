//! A scriptable `GiftLinkApi` for page tests.

use crate::{
    api::{AuthReply, GiftLinkApi, GiftView, Profile, RegisterBody, SearchParams},
    error::{ClientError, ClientResult},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Each scripted reply is either a value or the HTTP status of a failure.
pub struct FakeApi {
    pub login: Mutex<Result<AuthReply, u16>>,
    pub register: Mutex<Result<AuthReply, u16>>,
    pub profile: Mutex<Result<Option<Profile>, u16>>,
    pub gifts: Mutex<Result<Vec<GiftView>, u16>>,
    pub search: Mutex<Result<Vec<GiftView>, u16>>,
    pub last_search: Mutex<Option<SearchParams>>,
    pub calls: AtomicUsize,
    pub logouts: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            login: Mutex::new(Ok(AuthReply::default())),
            register: Mutex::new(Ok(AuthReply::default())),
            profile: Mutex::new(Ok(None)),
            gifts: Mutex::new(Ok(Vec::new())),
            search: Mutex::new(Ok(Vec::new())),
            last_search: Mutex::new(None),
            calls: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
            gate: None,
        }
    }
}

impl FakeApi {
    /// Every call blocks until the returned `Notify` is signalled once for it.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let api = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (api, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn scripted<T: Clone>(slot: &Mutex<Result<T, u16>>) -> ClientResult<T> {
    slot.lock()
        .unwrap()
        .clone()
        .map_err(|status| ClientError::Status {
            status,
            message: "scripted failure".to_string(),
        })
}

pub fn gift(id: &str, name: &str, description: Option<&str>) -> GiftView {
    GiftView {
        id: id.to_string(),
        document_id: None,
        name: name.to_string(),
        category: Some("Living".to_string()),
        condition: Some("New".to_string()),
        age_years: Some(1.0),
        age_days: Some(365),
        description: description.map(str::to_string),
        image: None,
        posted_by: None,
        zipcode: None,
        date_added: None,
    }
}

#[async_trait]
impl GiftLinkApi for FakeApi {
    async fn login(&self, _email: &str, _password: &str) -> ClientResult<AuthReply> {
        self.enter().await;
        scripted(&self.login)
    }

    async fn register(&self, _body: RegisterBody<'_>) -> ClientResult<AuthReply> {
        self.enter().await;
        scripted(&self.register)
    }

    async fn current_user(&self, _token: &str) -> ClientResult<Option<Profile>> {
        self.enter().await;
        scripted(&self.profile)
    }

    async fn logout(&self, _token: &str) -> ClientResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_gifts(&self) -> ClientResult<Vec<GiftView>> {
        self.enter().await;
        scripted(&self.gifts)
    }

    async fn get_gift(&self, id: &str) -> ClientResult<Option<GiftView>> {
        self.enter().await;
        Ok(scripted(&self.gifts)?.into_iter().find(|g| g.id == id))
    }

    async fn search(&self, params: &SearchParams) -> ClientResult<Vec<GiftView>> {
        *self.last_search.lock().unwrap() = Some(params.clone());
        self.enter().await;
        scripted(&self.search)
    }
}
