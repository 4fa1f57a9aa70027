//! CineSearch - terminal movie discovery backed by TMDB
//!
//! Search, browse popular titles or discover by filters, then open a movie
//! for its details and credits.
//!
//! # Modules
//!
//! - `models` - TMDB data structures and formatting helpers
//! - `api` - TMDB client with fallback-on-failure reads
//! - `coordinator` - browse view state: endpoint choice, paging, stale responses
//! - `config` - config file and credential resolution
//! - `logging` - tracing subscriber setup
//! - `cli` / `commands` - non-interactive mode
//! - `app` / `ui` - TUI state, key handling and rendering

pub mod models;
pub mod api;
pub mod coordinator;
pub mod config;
pub mod logging;
pub mod cli;
pub mod commands;
pub mod app;
pub mod ui;

// Re-export commonly used types
pub use models::{
    Credits, Genre, ImageSize, MovieDetail, MovieSummary, ResultPage, SearchFilters, SortKey,
};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, AppState};
pub use config::Config;
pub use coordinator::{Endpoint, FetchPlan, Intent, ViewState};
