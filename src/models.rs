//! Data structures and types for CineSearch
//!
//! Flat records mirroring the TMDB JSON shapes, organized by domain:
//! - **Catalog**: movie summaries, paged result envelopes, genres
//! - **Detail**: full movie records and production metadata
//! - **Credits**: cast and crew
//! - **Discover**: filter and sort parameters
//! - **Images**: poster/backdrop sizes

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Results per page as served by TMDB list endpoints
pub const PAGE_SIZE: u32 = 20;

/// TMDB refuses to serve pages beyond this, whatever `total_pages` says
pub const MAX_PAGES: u32 = 500;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Catalog Models
// =============================================================================

/// Movie as returned by search, popular and discover listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// `YYYY-MM-DD`, empty for unreleased titles
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
}

impl MovieSummary {
    /// Release year parsed from `release_date`
    pub fn year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(
            f,
            "{}{} - ★ {}",
            self.title,
            year_str,
            format_rating(self.vote_average)
        )
    }
}

/// Uniform paginated envelope for search/popular/discover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<MovieSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResultPage {
    /// The fallback page: `{page: 1, results: [], total_pages: 0, total_results: 0}`
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Copy of this page with `total_pages` capped at [`MAX_PAGES`]
    pub fn clamped(mut self) -> Self {
        self.total_pages = self.total_pages.min(MAX_PAGES);
        self
    }
}

/// Movie genre
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Detail Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Detailed movie information, fetched per movie on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    /// Minutes; TMDB reports `null` or `0` when unknown
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl MovieDetail {
    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// Release year for display, `"TBA"` when unknown
    pub fn release_year(&self) -> String {
        self.summary
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "TBA".to_string())
    }

    pub fn rating_str(&self) -> String {
        format_rating(self.summary.vote_average)
    }

    /// Runtime as `"2h 56m"`, `"N/A"` when unknown
    pub fn runtime_str(&self) -> String {
        match self.runtime {
            Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
            _ => "N/A".to_string(),
        }
    }

    pub fn genres_str(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Tagline if the movie has a non-blank one
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Window/page title, e.g. `"The Batman (2022) - CineSearch"`
    pub fn page_title(&self) -> String {
        format!("{} ({}) - CineSearch", self.title(), self.release_year())
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - ★ {}",
            self.title(),
            self.release_year(),
            self.runtime_str(),
            self.rating_str()
        )
    }
}

/// Title used when a movie could not be loaded
pub const NOT_FOUND_TITLE: &str = "Movie Not Found - CineSearch";

// =============================================================================
// Credits Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order, lower is more prominent
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Crew jobs shown on the detail screen, in display order
pub const KEY_CREW_JOBS: &[&str] = &[
    "Director",
    "Producer",
    "Writer",
    "Screenplay",
    "Executive Producer",
    "Cinematography",
    "Music",
    "Editor",
];

/// Number of billed cast members shown on the detail screen
pub const TOP_CAST: usize = 20;

/// Cast and crew for one movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn is_empty(&self) -> bool {
        self.cast.is_empty() && self.crew.is_empty()
    }

    pub fn director(&self) -> Option<&CrewMember> {
        self.crew.iter().find(|c| c.job == "Director")
    }

    pub fn writers(&self) -> Vec<&CrewMember> {
        self.crew
            .iter()
            .filter(|c| c.job == "Writer" || c.job == "Screenplay")
            .collect()
    }

    pub fn producers(&self) -> Vec<&CrewMember> {
        self.by_job("Producer")
    }

    pub fn by_job(&self, job: &str) -> Vec<&CrewMember> {
        self.crew.iter().filter(|c| c.job == job).collect()
    }

    /// Crew grouped under [`KEY_CREW_JOBS`], skipping jobs nobody holds
    pub fn key_crew(&self) -> Vec<(&'static str, Vec<&CrewMember>)> {
        KEY_CREW_JOBS
            .iter()
            .map(|job| (*job, self.by_job(job)))
            .filter(|(_, people)| !people.is_empty())
            .collect()
    }

    /// Top billed cast, ordered by `order`
    pub fn top_cast(&self) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order);
        cast.truncate(TOP_CAST);
        cast
    }
}

// =============================================================================
// Discover Models
// =============================================================================

/// Sort orders accepted by `/discover/movie`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "popularity.asc")]
    PopularityAsc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
    #[serde(rename = "vote_average.asc")]
    VoteAverageAsc,
    #[serde(rename = "release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "release_date.asc")]
    ReleaseDateAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::PopularityDesc,
        SortKey::PopularityAsc,
        SortKey::VoteAverageDesc,
        SortKey::VoteAverageAsc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
    ];

    /// Wire value for the `sort_by` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::PopularityAsc => "popularity.asc",
            SortKey::VoteAverageDesc => "vote_average.desc",
            SortKey::VoteAverageAsc => "vote_average.asc",
            SortKey::ReleaseDateDesc => "release_date.desc",
            SortKey::ReleaseDateAsc => "release_date.asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "Most Popular",
            SortKey::PopularityAsc => "Least Popular",
            SortKey::VoteAverageDesc => "Highest Rated",
            SortKey::VoteAverageAsc => "Lowest Rated",
            SortKey::ReleaseDateDesc => "Newest First",
            SortKey::ReleaseDateAsc => "Oldest First",
        }
    }

    /// Next sort order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discover filters; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub genre: Option<u32>,
    pub year: Option<u16>,
    pub min_rating: Option<f32>,
    pub sort: Option<SortKey>,
    pub language: Option<String>,
}

impl SearchFilters {
    /// True when no field constrains the listing
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.year.is_none()
            && self.min_rating.is_none()
            && self.sort.is_none()
            && self.language().is_none()
    }

    /// Original-language code, with a blank value treated as unset
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Query pairs for `/discover/movie`.
    ///
    /// Always carries `page`, `include_adult` and `sort_by`; the remaining
    /// parameters appear only for fields that are set.
    pub fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
            ("sort_by", self.sort.unwrap_or_default().as_str().to_string()),
        ];

        if let Some(genre) = self.genre {
            pairs.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(rating) = self.min_rating {
            pairs.push(("vote_average.gte", rating.to_string()));
        }
        if let Some(language) = self.language() {
            pairs.push(("with_original_language", language.to_string()));
        }

        pairs
    }
}

// =============================================================================
// Image Models
// =============================================================================

/// Image widths served by the TMDB image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    W200,
    W300,
    #[default]
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W200 => "w200",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Rating with one decimal, `"N/A"` for unrated
pub fn format_rating(vote_average: f32) -> String {
    if vote_average > 0.0 {
        format!("{:.1}", vote_average)
    } else {
        "N/A".to_string()
    }
}

/// Group digits in threes: 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar amount, e.g. "$185,000,000"
pub fn format_currency(amount: u64) -> String {
    format!("${}", format_thousands(amount))
}
