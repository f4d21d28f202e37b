//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.
//!
//! Gifts are stored as JSONB documents. The columns the search filters on are
//! copied out of the document at insert time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use giftlink_core::domain::{
    Category, Condition, Gift, GiftAttributes, NewGift, NewUser, User, UserCredentials,
};
use giftlink_core::ports::{DatabaseService, PortError, PortResult};
use giftlink_core::query::GiftQuery;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

/// The JSONB body of a gift row.
#[derive(Serialize, Deserialize)]
struct GiftDocument {
    name: String,
    category: Option<String>,
    condition: Option<String>,
    age_days: Option<u32>,
    age_years: Option<f64>,
    description: Option<String>,
    image: Option<String>,
    posted_by: Option<String>,
    zipcode: Option<String>,
    date_added: Option<i64>,
}

impl GiftDocument {
    fn from_domain(attrs: &GiftAttributes) -> Self {
        Self {
            name: attrs.name.clone(),
            category: attrs.category.map(|c| c.as_str().to_string()),
            condition: attrs.condition.map(|c| c.as_str().to_string()),
            age_days: attrs.age_days,
            age_years: attrs.age_years,
            description: attrs.description.clone(),
            image: attrs.image.clone(),
            posted_by: attrs.posted_by.clone(),
            zipcode: attrs.zipcode.clone(),
            date_added: attrs.date_added,
        }
    }

    fn to_domain(self) -> PortResult<GiftAttributes> {
        let category = self
            .category
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| PortError::Unexpected(format!("Corrupt gift document: {}", e)))?;
        let condition = self
            .condition
            .map(|c| c.parse::<Condition>())
            .transpose()
            .map_err(|e| PortError::Unexpected(format!("Corrupt gift document: {}", e)))?;

        Ok(GiftAttributes {
            name: self.name,
            category,
            condition,
            age_days: self.age_days,
            age_years: self.age_years,
            description: self.description,
            image: self.image,
            posted_by: self.posted_by,
            zipcode: self.zipcode,
            date_added: self.date_added,
        })
    }
}

#[derive(FromRow)]
struct GiftRecord {
    document_id: Uuid,
    id: String,
    document: Json<GiftDocument>,
}
impl GiftRecord {
    fn to_domain(self) -> PortResult<Gift> {
        Ok(Gift {
            id: self.id,
            document_id: self.document_id,
            attributes: self.document.0.to_domain()?,
        })
    }
}

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    created_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    #[sqlx(flatten)]
    user: UserRecord,
    hashed_password: String,
}

const GIFT_COLUMNS: &str = "document_id, id, document";
const USER_COLUMNS: &str = "user_id, first_name, last_name, email, created_at";

/// Case-insensitive substring test of `name` against `$1`. Lowercasing goes through the ICU
/// root collation so non-ASCII letters fold the same way whatever the database locale is.
const NAME_CONTAINS: &str =
    r#"strpos(lower(name COLLATE "und-x-icu"), lower($1::TEXT COLLATE "und-x-icu")) > 0"#;

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn list_gifts(&self) -> PortResult<Vec<Gift>> {
        let records = sqlx::query_as::<_, GiftRecord>(&format!(
            "SELECT {} FROM gifts ORDER BY seq ASC",
            GIFT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(GiftRecord::to_domain).collect()
    }

    async fn get_gift(&self, id: &str) -> PortResult<Gift> {
        sqlx::query_as::<_, GiftRecord>(&format!(
            "SELECT {} FROM gifts WHERE id = $1",
            GIFT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound("Gift not found".to_string()))?
        .to_domain()
    }

    async fn insert_gift(&self, gift: NewGift) -> PortResult<Gift> {
        let gift = gift.into_gift(Uuid::new_v4());
        let attrs = &gift.attributes;

        sqlx::query(
            "INSERT INTO gifts (document_id, id, name, category, condition, age_years, document) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(gift.document_id)
        .bind(&gift.id)
        .bind(&attrs.name)
        .bind(attrs.category.map(|c| c.as_str()))
        .bind(attrs.condition.map(|c| c.as_str()))
        .bind(attrs.age_years)
        .bind(Json(GiftDocument::from_domain(attrs)))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortError::Conflict(format!("Gift id '{}' already exists", gift.id))
            } else {
                unexpected(e)
            }
        })?;

        Ok(gift)
    }

    async fn search_gifts(&self, query: &GiftQuery) -> PortResult<Vec<Gift>> {
        let records = sqlx::query_as::<_, GiftRecord>(&format!(
            "SELECT {} FROM gifts \
             WHERE ($1::TEXT IS NULL OR {}) \
               AND ($2::FLOAT8 IS NULL OR (age_years IS NOT NULL AND age_years <= $2)) \
               AND ($3::TEXT IS NULL OR category = $3) \
               AND ($4::TEXT IS NULL OR condition = $4) \
             ORDER BY seq ASC",
            GIFT_COLUMNS, NAME_CONTAINS
        ))
        .bind(query.name.as_deref())
        .bind(query.max_age_years)
        .bind(query.category.as_deref())
        .bind(query.condition.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(GiftRecord::to_domain).collect()
    }

    async fn count_gifts(&self) -> PortResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gifts")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create_user(&self, user: NewUser, hashed_password: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (user_id, first_name, last_name, email, hashed_password) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortError::Conflict("Email id already exists".to_string())
            } else {
                unexpected(e)
            }
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(&format!(
            "SELECT {}, hashed_password FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))?;

        Ok(UserCredentials {
            user: record.user.to_domain(),
            hashed_password: record.hashed_password,
        })
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))?;
        Ok(record.to_domain())
    }

    async fn update_user_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET first_name = $1, last_name = $2 WHERE user_id = $3 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        sqlx::query("INSERT INTO auth_sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, token: &str) -> PortResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM auth_sessions WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
