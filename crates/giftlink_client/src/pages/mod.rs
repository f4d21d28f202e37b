//! crates/giftlink_client/src/pages/mod.rs
//!
//! Page controllers. Each page owns its form state, an in-flight slot and a
//! cancellation token that `teardown` (or dropping the page) fires.

pub mod details;
pub mod login;
pub mod register;
pub mod search;

pub use details::{DetailsPage, DetailsState};
pub use login::LoginPage;
pub use register::RegisterPage;
pub use search::{GiftCard, Refresh, SearchPage};

use crate::route::Route;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// How a form submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// Success; the shell should move to this route.
    Navigate(Route),
    /// The server answered but refused. An inline message is showing.
    Rejected,
    /// The request did not complete. An inline message is showing.
    Failed,
    /// Another submission from this page is still in flight. Nothing was sent.
    Busy,
    /// The page was torn down; the response was discarded.
    Cancelled,
}

/// Runs `fut` unless `cancel` fires first. `None` means the page went away.
pub(crate) async fn unless_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}
