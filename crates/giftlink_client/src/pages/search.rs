//! crates/giftlink_client/src/pages/search.rs
//!
//! The search page: filter controls, a result list loaded on mount and
//! refreshed per search, and navigation into a gift's details.

use super::unless_cancelled;
use crate::{
    api::{GiftLinkApi, GiftView, SearchParams},
    error::ClientResult,
    feedback::InFlight,
    route::Route,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Filter choices. The empty string stands for "All".
pub const CATEGORIES: [&str; 6] = ["", "Living", "Bedroom", "Bathroom", "Kitchen", "Office"];
pub const CONDITIONS: [&str; 4] = ["", "New", "Like New", "Older"];

pub const MIN_AGE_YEARS: u8 = 1;
pub const MAX_AGE_YEARS: u8 = 10;
pub const DEFAULT_AGE_YEARS: u8 = 6;

pub const NO_RESULTS: &str = "No products found. Please revise your filters.";
pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";
const EXCERPT_CHARS: usize = 100;

/// How a load or search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Results replaced; carries the new count.
    Updated(usize),
    /// The request failed; previous results are kept.
    Failed,
    Busy,
    Cancelled,
}

/// One result, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub excerpt: String,
}

impl From<&GiftView> for GiftCard {
    fn from(gift: &GiftView) -> Self {
        Self {
            id: gift.id.clone(),
            name: gift.name.clone(),
            image: gift
                .image
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            excerpt: excerpt(gift.description.as_deref().unwrap_or_default()),
        }
    }
}

fn excerpt(description: &str) -> String {
    let head: String = description.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}

#[derive(Debug)]
struct SearchState {
    filters: SearchParams,
    results: Vec<GiftView>,
    loaded: bool,
}

pub struct SearchPage {
    api: Arc<dyn GiftLinkApi>,
    state: Mutex<SearchState>,
    in_flight: InFlight,
    cancel: CancellationToken,
}

impl SearchPage {
    pub fn new(api: Arc<dyn GiftLinkApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SearchState {
                filters: SearchParams {
                    name: String::new(),
                    age_years: DEFAULT_AGE_YEARS,
                    category: String::new(),
                    condition: String::new(),
                },
                results: Vec::new(),
                loaded: false,
            }),
            in_flight: InFlight::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Loads the unfiltered list.
    pub async fn mount(&self) -> Refresh {
        self.refresh(self.api.list_gifts()).await
    }

    /// Runs the current filters against the search endpoint.
    pub async fn search(&self) -> Refresh {
        let params = self.filters().await;
        debug!(?params, "Searching gifts");
        self.refresh(self.api.search(&params)).await
    }

    async fn refresh<F>(&self, request: F) -> Refresh
    where
        F: std::future::Future<Output = ClientResult<Vec<GiftView>>>,
    {
        let Some(_slot) = self.in_flight.try_begin() else {
            return Refresh::Busy;
        };
        let Some(result) = unless_cancelled(&self.cancel, request).await else {
            return Refresh::Cancelled;
        };
        if self.cancel.is_cancelled() {
            return Refresh::Cancelled;
        }
        match result {
            Ok(gifts) => {
                let mut state = self.state.lock().await;
                state.results = gifts;
                state.loaded = true;
                Refresh::Updated(state.results.len())
            }
            Err(e) => {
                warn!("Failed to load gifts: {}", e);
                Refresh::Failed
            }
        }
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.state.lock().await.filters.name = name.into();
    }

    pub async fn set_age_years(&self, age: u8) {
        self.state.lock().await.filters.age_years = age.clamp(MIN_AGE_YEARS, MAX_AGE_YEARS);
    }

    /// Unknown values are ignored.
    pub async fn set_category(&self, category: &str) {
        if CATEGORIES.contains(&category) {
            self.state.lock().await.filters.category = category.to_string();
        }
    }

    /// Unknown values are ignored.
    pub async fn set_condition(&self, condition: &str) {
        if CONDITIONS.contains(&condition) {
            self.state.lock().await.filters.condition = condition.to_string();
        }
    }

    pub async fn filters(&self) -> SearchParams {
        self.state.lock().await.filters.clone()
    }

    pub async fn cards(&self) -> Vec<GiftCard> {
        self.state.lock().await.results.iter().map(GiftCard::from).collect()
    }

    /// Shown once a load has completed with nothing to list.
    pub async fn empty_message(&self) -> Option<&'static str> {
        let state = self.state.lock().await;
        (state.loaded && state.results.is_empty()).then_some(NO_RESULTS)
    }

    pub fn open_details(&self, card: &GiftCard) -> Route {
        Route::GiftDetails(card.id.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SearchPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{gift, FakeApi};

    #[test]
    fn excerpt_keeps_first_hundred_chars_and_appends_ellipsis() {
        let long = "é".repeat(150);
        let card = GiftCard::from(&gift("1", "Lamp", Some(&long)));
        assert_eq!(card.excerpt.chars().count(), 103);
        assert!(card.excerpt.ends_with("..."));

        let short = GiftCard::from(&gift("2", "Rug", Some("Soft")));
        assert_eq!(short.excerpt, "Soft...");
    }

    #[test]
    fn missing_image_falls_back_to_placeholder() {
        let card = GiftCard::from(&gift("1", "Lamp", None));
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.excerpt, "...");
    }

    #[tokio::test]
    async fn mount_loads_every_gift() {
        let api = FakeApi::default();
        *api.gifts.lock().unwrap() = Ok(vec![gift("1", "Lamp", None), gift("2", "Rug", None)]);
        let page = SearchPage::new(Arc::new(api));

        assert_eq!(page.empty_message().await, None);
        assert_eq!(page.mount().await, Refresh::Updated(2));
        let names: Vec<_> = page.cards().await.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Lamp", "Rug"]);
    }

    #[tokio::test]
    async fn search_sends_all_four_filters() {
        let api = Arc::new(FakeApi::default());
        let page = SearchPage::new(api.clone());
        page.set_name("lamp").await;
        page.set_category("Office").await;

        page.search().await;
        let sent = api.last_search.lock().unwrap().clone().unwrap();
        assert_eq!(
            sent,
            SearchParams {
                name: "lamp".to_string(),
                age_years: DEFAULT_AGE_YEARS,
                category: "Office".to_string(),
                condition: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn filter_setters_reject_out_of_range_values() {
        let page = SearchPage::new(Arc::new(FakeApi::default()));
        page.set_age_years(0).await;
        assert_eq!(page.filters().await.age_years, MIN_AGE_YEARS);
        page.set_age_years(42).await;
        assert_eq!(page.filters().await.age_years, MAX_AGE_YEARS);

        page.set_category("Garage").await;
        page.set_condition("Broken").await;
        let filters = page.filters().await;
        assert_eq!(filters.category, "");
        assert_eq!(filters.condition, "");
    }

    #[tokio::test]
    async fn empty_results_show_message() {
        let page = SearchPage::new(Arc::new(FakeApi::default()));
        assert_eq!(page.search().await, Refresh::Updated(0));
        assert_eq!(page.empty_message().await, Some(NO_RESULTS));
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_results() {
        let api = FakeApi::default();
        *api.gifts.lock().unwrap() = Ok(vec![gift("1", "Lamp", None)]);
        *api.search.lock().unwrap() = Err(500);
        let page = SearchPage::new(Arc::new(api));

        page.mount().await;
        assert_eq!(page.search().await, Refresh::Failed);
        assert_eq!(page.cards().await.len(), 1);
    }

    #[tokio::test]
    async fn selecting_a_card_routes_to_its_details() {
        let page = SearchPage::new(Arc::new(FakeApi::default()));
        let card = GiftCard::from(&gift("872", "Desk", None));
        assert_eq!(page.open_details(&card).path(), "/app/product/872");
    }

    #[tokio::test]
    async fn cancelled_search_leaves_results_untouched() {
        let (api, _gate) = FakeApi::gated();
        *api.search.lock().unwrap() = Ok(vec![gift("9", "Sofa", None)]);
        let api = Arc::new(api);
        let page = Arc::new(SearchPage::new(api.clone()));

        let pending = tokio::spawn({
            let page = page.clone();
            async move { page.search().await }
        });
        while api.calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(page.search().await, Refresh::Busy);

        page.teardown();
        assert_eq!(pending.await.unwrap(), Refresh::Cancelled);
        assert!(page.cards().await.is_empty());
        assert_eq!(page.empty_message().await, None);
    }
}
