//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `DatabaseService` port. Used when no
//! `DATABASE_URL` is configured and by the HTTP test-suite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use giftlink_core::domain::{AuthSession, Gift, NewGift, NewUser, User, UserCredentials};
use giftlink_core::ports::{DatabaseService, PortError, PortResult};
use giftlink_core::query::GiftQuery;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps every collection behind its own lock. Gifts stay in insertion order.
#[derive(Default)]
pub struct MemoryAdapter {
    gifts: RwLock<Vec<Gift>>,
    users: RwLock<HashMap<Uuid, UserCredentials>>,
    sessions: RwLock<HashMap<String, AuthSession>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for MemoryAdapter {
    async fn list_gifts(&self) -> PortResult<Vec<Gift>> {
        Ok(self.gifts.read().await.clone())
    }

    async fn get_gift(&self, id: &str) -> PortResult<Gift> {
        self.gifts
            .read()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Gift not found".to_string()))
    }

    async fn insert_gift(&self, gift: NewGift) -> PortResult<Gift> {
        let gift = gift.into_gift(Uuid::new_v4());
        let mut gifts = self.gifts.write().await;
        if gifts.iter().any(|g| g.id == gift.id) {
            return Err(PortError::Conflict(format!(
                "Gift id '{}' already exists",
                gift.id
            )));
        }
        gifts.push(gift.clone());
        Ok(gift)
    }

    async fn search_gifts(&self, query: &GiftQuery) -> PortResult<Vec<Gift>> {
        Ok(self
            .gifts
            .read()
            .await
            .iter()
            .filter(|g| query.matches(g))
            .cloned()
            .collect())
    }

    async fn count_gifts(&self) -> PortResult<u64> {
        Ok(self.gifts.read().await.len() as u64)
    }

    async fn create_user(&self, user: NewUser, hashed_password: &str) -> PortResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|c| c.user.email == user.email) {
            return Err(PortError::Conflict("Email id already exists".to_string()));
        }
        let created = User {
            user_id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: Utc::now(),
        };
        users.insert(
            created.user_id,
            UserCredentials {
                user: created.clone(),
                hashed_password: hashed_password.to_string(),
            },
        );
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.users
            .read()
            .await
            .values()
            .find(|c| c.user.email == email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        self.users
            .read()
            .await
            .get(&user_id)
            .map(|c| c.user.clone())
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn update_user_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> PortResult<User> {
        let mut users = self.users.write().await;
        let creds = users
            .get_mut(&user_id)
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))?;
        creds.user.first_name = first_name.to_string();
        creds.user.last_name = last_name.to_string();
        Ok(creds.user.clone())
    }

    async fn create_auth_session(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            token.to_string(),
            AuthSession {
                token: token.to_string(),
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn validate_auth_session(&self, token: &str) -> PortResult<Uuid> {
        match self.sessions.read().await.get(token) {
            Some(session) if session.expires_at > Utc::now() => Ok(session.user_id),
            _ => Err(PortError::Unauthorized),
        }
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
