//! crates/giftlink_client/src/api.rs
//!
//! The wire types exchanged with the backend and the `GiftLinkApi` contract the
//! pages are written against.

use crate::error::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

//=========================================================================================
// Wire Types
//=========================================================================================

/// A gift as served by the gift and search endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GiftView {
    pub id: String,
    #[serde(rename = "_id", default)]
    pub document_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub age_years: Option<f64>,
    #[serde(default)]
    pub age_days: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub date_added: Option<i64>,
}

/// Body of every login/register response, successful or not.
///
/// Success is signalled only by the presence of `authtoken`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthReply {
    #[serde(default)]
    pub authtoken: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The owner of a token, as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// The four search parameters, sent verbatim as the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub name: String,
    pub age_years: u8,
    pub category: String,
    pub condition: String,
}

impl SearchParams {
    pub fn to_query(&self) -> [(&'static str, String); 4] {
        [
            ("name", self.name.clone()),
            ("age_years", self.age_years.to_string()),
            ("category", self.category.clone()),
            ("condition", self.condition.clone()),
        ]
    }
}

//=========================================================================================
// The API Port
//=========================================================================================

#[async_trait]
pub trait GiftLinkApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthReply>;

    async fn register(&self, body: RegisterBody<'_>) -> ClientResult<AuthReply>;

    /// `Ok(None)` when the server rejects the token.
    async fn current_user(&self, token: &str) -> ClientResult<Option<Profile>>;

    async fn logout(&self, token: &str) -> ClientResult<()>;

    async fn list_gifts(&self) -> ClientResult<Vec<GiftView>>;

    /// `Ok(None)` when no gift has this id.
    async fn get_gift(&self, id: &str) -> ClientResult<Option<GiftView>>;

    async fn search(&self, params: &SearchParams) -> ClientResult<Vec<GiftView>>;
}
