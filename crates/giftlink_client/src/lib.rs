//! Client side of GiftLink: the HTTP binding to the backend and the page
//! controllers that drive it.

pub mod api;
pub mod app;
pub mod error;
pub mod feedback;
pub mod http;
pub mod pages;
pub mod route;
pub mod session;

#[cfg(test)]
mod fake;

pub use api::{AuthReply, GiftLinkApi, GiftView, Profile, SearchParams};
pub use app::App;
pub use error::{ClientError, ClientResult};
pub use http::HttpApi;
pub use pages::{
    DetailsPage, DetailsState, GiftCard, LoginPage, Refresh, RegisterPage, SearchPage, Submit,
};
pub use route::Route;
pub use session::{Session, SessionContext};
