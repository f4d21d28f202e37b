//! crates/giftlink_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Validation
//=========================================================================================

/// Raised when caller-supplied data cannot become a domain value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Trims `value` and maps the empty string to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//=========================================================================================
// Gift Enumerations
//=========================================================================================

/// The room a gift belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Living,
    Bedroom,
    Bathroom,
    Kitchen,
    Office,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Living,
        Category::Bedroom,
        Category::Bathroom,
        Category::Kitchen,
        Category::Office,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Living => "Living",
            Category::Bedroom => "Bedroom",
            Category::Bathroom => "Bathroom",
            Category::Kitchen => "Kitchen",
            Category::Office => "Office",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::new(format!("Unknown category '{}'", s)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How worn a gift is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    New,
    LikeNew,
    Older,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::LikeNew, Condition::Older];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Older => "Older",
        }
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::new(format!("Unknown condition '{}'", s)))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Gifts
//=========================================================================================

/// Everything a gift listing says about the item itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GiftAttributes {
    pub name: String,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub age_days: Option<u32>,
    pub age_years: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub posted_by: Option<String>,
    pub zipcode: Option<String>,
    /// Unix timestamp (seconds).
    pub date_added: Option<i64>,
}

/// A stored gift listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Gift {
    /// Public identifier used for lookups.
    pub id: String,
    /// Identifier assigned by the store on insert.
    pub document_id: Uuid,
    pub attributes: GiftAttributes,
}

/// An unvalidated create-gift payload, as received from a client or a seed file.
#[derive(Debug, Clone, Default)]
pub struct GiftDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub age_days: Option<i64>,
    pub age_years: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub posted_by: Option<String>,
    pub zipcode: Option<String>,
    pub date_added: Option<i64>,
}

/// A gift payload that passed validation and may be persisted.
///
/// The only way to obtain one is `NewGift::try_from(GiftDraft)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGift {
    id: Option<String>,
    attributes: GiftAttributes,
}

impl NewGift {
    /// The client-chosen identifier, if any.
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> &GiftAttributes {
        &self.attributes
    }

    /// Builds the stored gift once the store has assigned `document_id`.
    ///
    /// Without a requested id the public id is the document id's string form.
    pub fn into_gift(self, document_id: Uuid) -> Gift {
        Gift {
            id: self.id.unwrap_or_else(|| document_id.to_string()),
            document_id,
            attributes: self.attributes,
        }
    }
}

impl TryFrom<GiftDraft> for NewGift {
    type Error = ValidationError;

    fn try_from(draft: GiftDraft) -> Result<Self, Self::Error> {
        let name = non_blank(draft.name)
            .ok_or_else(|| ValidationError::new("Gift name is required"))?;

        let category = non_blank(draft.category)
            .map(|c| c.parse::<Category>())
            .transpose()?;
        let condition = non_blank(draft.condition)
            .map(|c| c.parse::<Condition>())
            .transpose()?;

        let age_days = draft
            .age_days
            .map(|days| {
                u32::try_from(days)
                    .map_err(|_| ValidationError::new("age_days must be a non-negative integer"))
            })
            .transpose()?;

        if let Some(years) = draft.age_years {
            if !years.is_finite() || years < 0.0 {
                return Err(ValidationError::new(
                    "age_years must be a non-negative number",
                ));
            }
        }

        Ok(Self {
            id: non_blank(draft.id),
            attributes: GiftAttributes {
                name,
                category,
                condition,
                age_days,
                age_years: draft.age_years,
                description: draft.description,
                image: draft.image,
                posted_by: draft.posted_by,
                zipcode: draft.zipcode,
                date_added: draft.date_added,
            },
        })
    }
}

//=========================================================================================
// Users
//=========================================================================================

/// Represents a registered user - used throughout the app.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub hashed_password: String,
}

/// Validated registration data (the password travels separately, already hashed).
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Result<Self, ValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::new("First name is required"));
        }
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::new("Email is required"));
        }
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.trim().to_string(),
            email,
        })
    }
}

/// Emails are unique case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// Represents an issued login token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
