//! crates/giftlink_client/src/feedback.rs
//!
//! Small pieces of page state shared by every form: the transient inline
//! message and the request-in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// An inline message that disappears on its own after `lifetime`.
#[derive(Debug, Clone)]
pub struct Flash {
    text: String,
    expires_at: Instant,
}

impl Flash {
    pub fn new(text: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + lifetime,
        }
    }

    /// The text, or `None` once the lifetime has elapsed.
    pub fn visible(&self) -> Option<&str> {
        (Instant::now() < self.expires_at).then_some(self.text.as_str())
    }
}

/// At most one request per page at a time.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

impl InFlight {
    /// Claims the slot. Returns `None` while another request holds it.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { owner: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the slot when dropped, whatever way the request ended.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.busy.store(false, Ordering::Release);
    }
}
