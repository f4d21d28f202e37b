//! crates/giftlink_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific storage implementations.

use crate::domain::{Gift, NewGift, NewUser, User, UserCredentials, ValidationError};
use crate::query::GiftQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint was violated. The message is safe to show to clients.
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl From<ValidationError> for PortError {
    fn from(err: ValidationError) -> Self {
        PortError::Invalid(err.0)
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Gift Collection ---
    async fn list_gifts(&self) -> PortResult<Vec<Gift>>;

    /// Looks a gift up by its public `id` (string comparison).
    async fn get_gift(&self, id: &str) -> PortResult<Gift>;

    /// Persists a validated gift. A requested id that already exists is a `Conflict`.
    async fn insert_gift(&self, gift: NewGift) -> PortResult<Gift>;

    async fn search_gifts(&self, query: &GiftQuery) -> PortResult<Vec<Gift>>;

    async fn count_gifts(&self) -> PortResult<u64>;

    // --- User Management ---
    /// Creates a user. An email that is already registered is a `Conflict`.
    async fn create_user(&self, user: NewUser, hashed_password: &str) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User>;

    async fn update_user_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> PortResult<User>;

    // --- Auth Tokens ---
    async fn create_auth_session(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Returns the owner of a live token. Unknown or expired tokens are `Unauthorized`.
    async fn validate_auth_session(&self, token: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, token: &str) -> PortResult<()>;
}
