//! API clients for external services
//!
//! - TMDB: movie search, discovery, details and credits

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
