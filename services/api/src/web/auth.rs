//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for registration, login, profile and logout.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Duration, Utc};
use giftlink_core::{
    domain::{normalize_email, NewUser},
    ports::PortError,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::ApiError,
    web::{middleware::AuthenticatedUser, state::AppState},
};

pub const MIN_PASSWORD_LEN: usize = 6;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub authtoken: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub authtoken: String,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_name: String,
    pub user_email: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub authtoken: String,
    pub user_name: String,
}

//=========================================================================================
// Helpers
//=========================================================================================

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".to_string())
}

/// Runs argon2 work on the blocking pool so it does not hold up request workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("Password task failed: {}", e);
        ApiError::Internal("Password task failed".to_string())
    })?
}

async fn hash_password(password: String) -> Result<String, ApiError> {
    run_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("Failed to hash password: {:?}", e);
                ApiError::Internal("Failed to hash password".to_string())
            })
    })
    .await
}

async fn verify_password(password: String, hashed: String) -> Result<bool, ApiError> {
    run_blocking(move || {
        let parsed_hash = PasswordHash::new(&hashed).map_err(|e| {
            error!("Failed to parse password hash: {:?}", e);
            ApiError::Internal("Authentication error".to_string())
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
}

/// Generates a token for `user_id` and records it with the configured lifetime.
async fn issue_token(state: &AppState, user_id: Uuid) -> Result<String, ApiError> {
    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(state.config.auth_token_ttl_days);
    state
        .db
        .create_auth_session(&token, user_id, expires_at)
        .await?;
    Ok(token)
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = RegisterResponse),
        (status = 400, description = "Invalid request or email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    // 1. Validate the input
    let new_user = NewUser::new(&req.first_name, &req.last_name, &req.email)?;
    if !is_valid_email(&new_user.email) {
        return Err(ApiError::Validation("Invalid email".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    // 2. Hash the password and create the user
    let password_hash = hash_password(req.password).await?;
    let user = state.db.create_user(new_user, &password_hash).await?;

    // 3. Issue a token
    let authtoken = issue_token(&state, user.user_id).await?;
    info!(user_id = %user.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            authtoken,
            email: user.email,
        }),
    ))
}

/// POST /api/auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload?;

    // 1. Get user by email
    let creds = match state.db.get_user_by_email(&normalize_email(&req.email)).await {
        Ok(creds) => creds,
        Err(PortError::NotFound(_)) => {
            warn!("Login attempt for unknown email");
            return Err(invalid_credentials());
        }
        Err(e) => return Err(e.into()),
    };

    // 2. Verify password
    if !verify_password(req.password, creds.hashed_password).await? {
        warn!(user_id = %creds.user.user_id, "Login attempt with wrong password");
        return Err(invalid_credentials());
    }

    // 3. Issue a token
    let authtoken = issue_token(&state, creds.user.user_id).await?;
    info!(user_id = %creds.user.user_id, "User logged in");

    Ok(Json(LoginResponse {
        authtoken,
        user_name: creds.user.first_name,
        user_email: creds.user.email,
    }))
}

/// GET /api/auth/me - Confirm a token and return its owner
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Token is valid", body = ProfileResponse),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer" = []))
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .db
        .get_user_by_id(caller.user_id)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => ApiError::Unauthorized("Unknown user".to_string()),
            other => other.into(),
        })?;

    Ok(Json(ProfileResponse {
        user_name: user.first_name,
        user_email: user.email,
    }))
}

/// PUT /api/auth/update - Change the caller's name
#[utoipa::path(
    put,
    path = "/api/auth/update",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UpdateProfileResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer" = []))
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let Json(req) = payload?;
    let first_name = req.first_name.trim();
    if first_name.is_empty() {
        return Err(ApiError::Validation("First name is required".to_string()));
    }

    let current = state.db.get_user_by_id(caller.user_id).await?;
    let last_name = req
        .last_name
        .map(|l| l.trim().to_string())
        .unwrap_or(current.last_name);

    let user = state
        .db
        .update_user_name(caller.user_id, first_name, &last_name)
        .await?;
    info!(user_id = %user.user_id, "Profile updated");

    Ok(Json(UpdateProfileResponse {
        authtoken: caller.token,
        user_name: user.first_name,
    }))
}

/// POST /api/auth/logout - Revoke the caller's token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Logout successful"),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer" = []))
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_auth_session(&caller.token).await?;
    info!(user_id = %caller.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
