//! crates/giftlink_client/src/route.rs

/// Where a page asks the shell to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Search,
    GiftDetails(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/app".to_string(),
            Route::Login => "/app/login".to_string(),
            Route::Register => "/app/register".to_string(),
            Route::Search => "/app/search".to_string(),
            Route::GiftDetails(id) => format!("/app/product/{}", id),
        }
    }
}
