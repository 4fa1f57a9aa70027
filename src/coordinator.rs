//! View state coordinator
//!
//! Owns what the browse screen shows: the current query, active filters,
//! page, last committed result page and genre list. Every user intent turns
//! into exactly one [`FetchPlan`]; the response for a plan is committed only
//! if the plan is still the latest one issued.

use tracing::debug;

use crate::api::TmdbClient;
use crate::models::{format_thousands, Genre, ResultPage, SearchFilters, PAGE_SIZE};

/// Sequence number attached to each issued plan
pub type RequestToken = u64;

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// First paint: genres plus the popular listing
    InitialLoad,
    /// New search; always restarts at page 1
    Submit { query: String, filters: SearchFilters },
    /// Same listing, different page
    ChangePage(u32),
    /// Drop all filters, keep the query
    ClearFilters,
}

/// Which listing endpoint a plan hits
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Search { query: String },
    Discover { filters: SearchFilters },
    Popular,
}

impl Endpoint {
    /// Precedence: a non-blank query searches, otherwise any filter
    /// discovers, otherwise popular.
    pub fn select(query: &str, filters: &SearchFilters) -> Self {
        let query = query.trim();
        if !query.is_empty() {
            Endpoint::Search {
                query: query.to_string(),
            }
        } else if !filters.is_empty() {
            Endpoint::Discover {
                filters: filters.clone(),
            }
        } else {
            Endpoint::Popular
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Search { .. } => "search",
            Endpoint::Discover { .. } => "discover",
            Endpoint::Popular => "popular",
        }
    }

    pub async fn fetch(&self, client: &TmdbClient, page: u32) -> ResultPage {
        match self {
            Endpoint::Search { query } => client.search_movies(query, page).await,
            Endpoint::Discover { filters } => client.discover_movies(filters, page).await,
            Endpoint::Popular => client.popular_movies(page).await,
        }
    }
}

/// One API call to make on behalf of an intent
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub token: RequestToken,
    pub endpoint: Endpoint,
    pub page: u32,
    /// Reset the list selection when the response lands
    pub scroll_to_top: bool,
    /// Also fetch the genre list (first load only)
    pub load_genres: bool,
}

impl FetchPlan {
    pub async fn execute(&self, client: &TmdbClient) -> ResultPage {
        self.endpoint.fetch(client, self.page).await
    }
}

/// Browse screen state
#[derive(Debug, Clone)]
pub struct ViewState {
    pub query: String,
    pub filters: SearchFilters,
    pub page: u32,
    pub results: ResultPage,
    pub loading: bool,
    pub genres: Vec<Genre>,
    genres_requested: bool,
    latest: RequestToken,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            filters: SearchFilters::default(),
            page: 1,
            results: ResultPage::empty(),
            loading: false,
            genres: Vec::new(),
            genres_requested: false,
            latest: 0,
        }
    }

    /// Apply an intent and return the single fetch it requires
    pub fn apply(&mut self, intent: Intent) -> FetchPlan {
        let mut load_genres = false;
        // nothing has been scrolled before the first listing
        let scroll_to_top = intent != Intent::InitialLoad;

        let endpoint = match intent {
            Intent::InitialLoad => {
                load_genres = !self.genres_requested;
                self.genres_requested = true;
                self.page = 1;
                Endpoint::Popular
            }
            Intent::Submit { query, filters } => {
                self.query = query;
                self.filters = filters;
                self.page = 1;
                Endpoint::select(&self.query, &self.filters)
            }
            Intent::ChangePage(page) => {
                self.page = page.clamp(1, self.total_pages().max(1));
                Endpoint::select(&self.query, &self.filters)
            }
            Intent::ClearFilters => {
                self.filters = SearchFilters::default();
                self.page = 1;
                Endpoint::select(&self.query, &self.filters)
            }
        };

        self.latest += 1;
        self.loading = true;

        FetchPlan {
            token: self.latest,
            endpoint,
            page: self.page,
            scroll_to_top,
            load_genres,
        }
    }

    /// Commit a response. Returns false (and changes nothing) when a newer
    /// plan has been issued since `token`.
    pub fn commit(&mut self, token: RequestToken, page: ResultPage) -> bool {
        if token != self.latest {
            debug!(token, latest = self.latest, "discarding stale response");
            return false;
        }
        self.results = page.clamped();
        self.loading = false;
        true
    }

    pub fn set_genres(&mut self, genres: Vec<Genre>) {
        self.genres = genres;
    }

    pub fn genre_name(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest
    }

    pub fn total_pages(&self) -> u32 {
        self.results.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn results_text(&self) -> String {
        results_text(self.page, self.results.total_results)
    }
}

/// `"Showing 41-47 of 47 results"`, empty when there is nothing to show
pub fn results_text(page: u32, total_results: u32) -> String {
    if total_results == 0 {
        return String::new();
    }
    let page = page.max(1);
    let start = (page - 1) * PAGE_SIZE + 1;
    let end = (page * PAGE_SIZE).min(total_results);
    format!(
        "Showing {}-{} of {} results",
        start,
        end,
        format_thousands(total_results as u64)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;

    fn page_of(total_pages: u32, total_results: u32) -> ResultPage {
        ResultPage {
            page: 1,
            results: Vec::new(),
            total_pages,
            total_results,
        }
    }

    #[test]
    fn test_initial_load_requests_genres_once() {
        let mut state = ViewState::new();
        let first = state.apply(Intent::InitialLoad);
        assert!(first.load_genres);
        assert_eq!(first.endpoint, Endpoint::Popular);
        assert_eq!(first.page, 1);
        assert!(!first.scroll_to_top);
        assert!(state.loading);

        let again = state.apply(Intent::InitialLoad);
        assert!(!again.load_genres);
    }

    #[test]
    fn test_select_precedence() {
        let filters = SearchFilters {
            genre: Some(28),
            ..Default::default()
        };
        assert_eq!(
            Endpoint::select("matrix", &filters),
            Endpoint::Search {
                query: "matrix".into()
            }
        );
        assert_eq!(
            Endpoint::select("   ", &filters),
            Endpoint::Discover {
                filters: filters.clone()
            }
        );
        assert_eq!(
            Endpoint::select("", &SearchFilters::default()),
            Endpoint::Popular
        );
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(
            Endpoint::select("  heat ", &SearchFilters::default()),
            Endpoint::Search {
                query: "heat".into()
            }
        );
    }

    #[test]
    fn test_tokens_increase() {
        let mut state = ViewState::new();
        let a = state.apply(Intent::InitialLoad).token;
        let b = state.apply(Intent::ChangePage(1)).token;
        assert!(b > a);
        assert_eq!(state.latest_token(), b);
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let mut state = ViewState::new();
        let old = state.apply(Intent::InitialLoad);
        let new = state.apply(Intent::Submit {
            query: "alien".into(),
            filters: SearchFilters::default(),
        });

        assert!(!state.commit(old.token, page_of(9, 170)));
        assert!(state.loading);
        assert_eq!(state.results.total_results, 0);

        assert!(state.commit(new.token, page_of(2, 30)));
        assert!(!state.loading);
        assert_eq!(state.results.total_results, 30);

        // late arrival after the fresh one
        assert!(!state.commit(old.token, page_of(9, 170)));
        assert_eq!(state.results.total_results, 30);
    }

    #[test]
    fn test_change_page_clamps_to_known_pages() {
        let mut state = ViewState::new();
        let plan = state.apply(Intent::InitialLoad);
        state.commit(plan.token, page_of(3, 47));

        assert_eq!(state.apply(Intent::ChangePage(9)).page, 3);
        assert_eq!(state.apply(Intent::ChangePage(0)).page, 1);

        let plan = state.apply(Intent::ChangePage(2));
        assert_eq!(plan.page, 2);
        assert!(plan.scroll_to_top);
    }

    #[test]
    fn test_commit_clamps_total_pages() {
        let mut state = ViewState::new();
        let plan = state.apply(Intent::InitialLoad);
        state.commit(plan.token, page_of(41_234, 824_680));
        assert_eq!(state.total_pages(), 500);
    }

    #[test]
    fn test_clear_filters_keeps_query() {
        let mut state = ViewState::new();
        state.apply(Intent::Submit {
            query: "dune".into(),
            filters: SearchFilters {
                year: Some(2021),
                sort: Some(SortKey::VoteAverageDesc),
                ..Default::default()
            },
        });
        let plan = state.apply(Intent::ClearFilters);
        assert!(state.filters.is_empty());
        assert_eq!(plan.page, 1);
        assert_eq!(
            plan.endpoint,
            Endpoint::Search {
                query: "dune".into()
            }
        );
    }

    #[test]
    fn test_results_text() {
        assert_eq!(results_text(1, 0), "");
        assert_eq!(results_text(1, 47), "Showing 1-20 of 47 results");
        assert_eq!(results_text(3, 47), "Showing 41-47 of 47 results");
        assert_eq!(results_text(2, 12_345), "Showing 21-40 of 12,345 results");
    }

    #[test]
    fn test_page_navigation_flags() {
        let mut state = ViewState::new();
        let plan = state.apply(Intent::InitialLoad);
        state.commit(plan.token, page_of(2, 30));
        assert!(!state.has_prev_page());
        assert!(state.has_next_page());

        let plan = state.apply(Intent::ChangePage(2));
        state.commit(plan.token, page_of(2, 30));
        assert!(state.has_prev_page());
        assert!(!state.has_next_page());
    }
}
