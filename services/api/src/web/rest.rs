//! services/api/src/web/rest.rs
//!
//! The liveness route and the master definition for the OpenAPI specification.

use crate::web::{auth, gifts, search};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        gifts::list_gifts_handler,
        gifts::get_gift_handler,
        gifts::create_gift_handler,
        search::search_gifts_handler,
        auth::register_handler,
        auth::login_handler,
        auth::me_handler,
        auth::update_profile_handler,
        auth::logout_handler,
    ),
    components(
        schemas(
            gifts::GiftResponse,
            gifts::CreateGiftRequest,
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ProfileResponse,
            auth::UpdateProfileRequest,
            auth::UpdateProfileResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "GiftLink API", description = "Browse, search and list donated gifts.")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by the protected auth routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

//=========================================================================================
// Liveness
//=========================================================================================

pub const LIVENESS_TEXT: &str = "Inside the server";

/// GET / - Plain-text liveness probe
pub async fn root_handler() -> &'static str {
    LIVENESS_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/gifts",
            "/api/gifts/{id}",
            "/api/search",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/auth/update",
            "/api/auth/logout",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let schemes = doc.components.map(|c| c.security_schemes).unwrap_or_default();
        assert!(schemes.contains_key("bearer"));
    }
}
