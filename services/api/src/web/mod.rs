pub mod auth;
pub mod gifts;
pub mod middleware;
pub mod rest;
pub mod search;
pub mod state;

pub use middleware::require_auth;

use crate::{config::Config, error::ApiError};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(config: &Config) -> Result<CorsLayer, ApiError> {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.parse::<HeaderValue>().map_err(|e| {
            ApiError::Internal(format!("Invalid CORS_ALLOWED_ORIGIN '{}': {}", origin, e))
        })?),
        None => AllowOrigin::any(),
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]))
}

/// Builds the complete application: API routes, liveness route and Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let cors = cors_layer(&app_state.config)?;

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route(
            "/api/gifts",
            get(gifts::list_gifts_handler).post(gifts::create_gift_handler),
        )
        .route("/api/gifts/{id}", get(gifts::get_gift_handler))
        .route("/api/search", get(search::search_gifts_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/auth/update", put(auth::update_profile_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .route("/", get(rest::root_handler))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
