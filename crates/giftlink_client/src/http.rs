//! crates/giftlink_client/src/http.rs
//!
//! The `reqwest` implementation of `GiftLinkApi`.

use crate::{
    api::{AuthReply, GiftLinkApi, GiftView, LoginBody, Profile, RegisterBody, SearchParams},
    error::{ClientError, ClientResult},
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to a GiftLink backend rooted at `base_url`.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decodes a success body, or turns any other status into `ClientError::Status`.
async fn expect_json<T: DeserializeOwned>(res: Response) -> ClientResult<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    let message = res.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl GiftLinkApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthReply> {
        let res = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginBody { email, password })
            .send()
            .await?;
        debug!(status = %res.status(), "Login response");
        // Failed logins still carry a JSON body; the page inspects it for a token.
        Ok(res.json::<AuthReply>().await?)
    }

    async fn register(&self, body: RegisterBody<'_>) -> ClientResult<AuthReply> {
        let res = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await?;
        debug!(status = %res.status(), "Register response");
        Ok(res.json::<AuthReply>().await?)
    }

    async fn current_user(&self, token: &str) -> ClientResult<Option<Profile>> {
        let res = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        if res.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        expect_json(res).await.map(Some)
    }

    async fn logout(&self, token: &str) -> ClientResult<()> {
        let res = self
            .client
            .post(self.url("/api/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        match res.status() {
            status if status.is_success() || status == StatusCode::UNAUTHORIZED => Ok(()),
            status => Err(ClientError::Status {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn list_gifts(&self) -> ClientResult<Vec<GiftView>> {
        let res = self.client.get(self.url("/api/gifts")).send().await?;
        expect_json(res).await
    }

    async fn get_gift(&self, id: &str) -> ClientResult<Option<GiftView>> {
        let mut url = reqwest::Url::parse(&self.url("/api/gifts/"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(id);

        let res = self.client.get(url).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        expect_json(res).await.map(Some)
    }

    async fn search(&self, params: &SearchParams) -> ClientResult<Vec<GiftView>> {
        let res = self
            .client
            .get(self.url("/api/search"))
            .query(&params.to_query())
            .send()
            .await?;
        expect_json(res).await
    }
}
