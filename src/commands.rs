//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the TMDB client.
//! Each handler takes CLI args, a client and Output, returns ExitCode.

use serde::Serialize;

use crate::api::TmdbClient;
use crate::cli::{
    CreditsCmd, DiscoverCmd, ExitCode, GenresCmd, ImageCmd, ImageResponse, InfoCmd,
    ListingResponse, Output, PopularCmd, SearchCmd,
};
use crate::coordinator::{results_text, Endpoint};
use crate::models::{
    format_currency, CastMember, Credits, CrewMember, Genre, ImageSize, MovieDetail, ResultPage,
    TOP_CAST,
};

fn print_or_fail<T: Serialize>(
    output: &Output,
    data: &T,
    human: impl FnOnce(&T) -> String,
) -> ExitCode {
    match output.print(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Listing Commands
// =============================================================================

async fn run_listing(
    endpoint: Endpoint,
    page: u32,
    client: &TmdbClient,
    output: &Output,
) -> ExitCode {
    let results = endpoint.fetch(client, page).await.clamped();
    let listing = listing_response(endpoint.name(), page, results);
    print_or_fail(output, &listing, format_listing)
}

pub fn listing_response(source: &str, page: u32, results: ResultPage) -> ListingResponse {
    ListingResponse {
        source: source.to_string(),
        page,
        total_pages: results.total_pages,
        total_results: results.total_results,
        summary: results_text(page, results.total_results),
        results: results.results,
    }
}

fn format_listing(listing: &ListingResponse) -> String {
    if listing.results.is_empty() {
        return "No movies found".to_string();
    }

    let mut lines: Vec<String> = listing
        .results
        .iter()
        .map(|m| format!("{:>8}  {}", m.id, m))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "{} (page {}/{})",
        listing.summary, listing.page, listing.total_pages
    ));
    lines.join("\n")
}

pub async fn search_cmd(cmd: SearchCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let query = cmd.query.unwrap_or_default();
    let endpoint = Endpoint::select(&query, &cmd.filters.to_filters());

    match &endpoint {
        Endpoint::Search { query } => output.info(format!("Searching for: {}", query)),
        Endpoint::Discover { .. } => output.info("No query given, browsing by filters..."),
        Endpoint::Popular => output.info("No query or filters given, showing popular movies..."),
    }

    run_listing(endpoint, cmd.page, client, output).await
}

pub async fn popular_cmd(cmd: PopularCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info("Fetching popular movies...");
    run_listing(Endpoint::Popular, cmd.page, client, output).await
}

pub async fn discover_cmd(cmd: DiscoverCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let filters = cmd.filters.to_filters();
    output.info("Discovering movies...");
    run_listing(Endpoint::Discover { filters }, cmd.page, client, output).await
}

// =============================================================================
// Info Command
// =============================================================================

/// Details plus the credits highlights shown on the detail screen
#[derive(Debug, Serialize)]
pub struct MovieInfo {
    #[serde(flatten)]
    pub detail: MovieDetail,
    pub poster_url: String,
    pub backdrop_url: String,
    pub director: Option<CrewMember>,
    pub writers: Vec<CrewMember>,
    pub cast: Vec<CastMember>,
}

fn format_info(info: &MovieInfo) -> String {
    let detail = &info.detail;
    let mut lines = vec![
        format!("{} ({})", detail.title(), detail.release_year()),
        format!(
            "★ {}  ·  {}  ·  {}",
            detail.rating_str(),
            detail.runtime_str(),
            detail.genres_str()
        ),
    ];
    if let Some(tagline) = detail.tagline() {
        lines.push(format!("\"{}\"", tagline));
    }
    lines.push(String::new());
    lines.push(detail.summary.overview.clone());
    lines.push(String::new());

    if let Some(director) = &info.director {
        lines.push(format!("Director: {}", director.name));
    }
    if !info.writers.is_empty() {
        let names: Vec<&str> = info.writers.iter().map(|w| w.name.as_str()).collect();
        lines.push(format!("Writers:  {}", names.join(", ")));
    }
    lines.push(format!("Status:   {}", detail.status));
    if detail.budget > 0 {
        lines.push(format!("Budget:   {}", format_currency(detail.budget)));
    }
    if detail.revenue > 0 {
        lines.push(format!("Revenue:  {}", format_currency(detail.revenue)));
    }
    if !info.cast.is_empty() {
        let names: Vec<&str> = info.cast.iter().take(5).map(|c| c.name.as_str()).collect();
        lines.push(format!("Starring: {}", names.join(", ")));
    }
    lines.push(format!("Poster:   {}", info.poster_url));
    lines.join("\n")
}

pub async fn info_cmd(cmd: InfoCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    let (detail, credits) = tokio::join!(client.movie_details(cmd.id), client.movie_credits(cmd.id));

    let Some(detail) = detail else {
        return output.error(format!("Movie {} not found", cmd.id), ExitCode::NotFound);
    };

    let info = MovieInfo {
        poster_url: client.image_url(detail.summary.poster_path.as_deref(), ImageSize::W500),
        backdrop_url: client.image_url(detail.summary.backdrop_path.as_deref(), ImageSize::Original),
        director: credits.director().cloned(),
        writers: credits.writers().into_iter().cloned().collect(),
        cast: credits.top_cast().into_iter().cloned().collect(),
        detail,
    };
    print_or_fail(output, &info, format_info)
}

// =============================================================================
// Credits Command
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub id: u64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

fn format_credits(credits: &Credits, limit: usize) -> String {
    if credits.is_empty() {
        return "No credits available".to_string();
    }

    let mut lines = vec!["CAST".to_string()];
    let mut cast: Vec<&CastMember> = credits.cast.iter().collect();
    cast.sort_by_key(|c| c.order);
    for member in cast.into_iter().take(limit) {
        lines.push(format!("  {:<28} {}", member.name, member.character));
    }

    lines.push(String::new());
    lines.push("CREW".to_string());
    for (job, people) in credits.key_crew() {
        let names: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
        lines.push(format!("  {:<20} {}", job, names.join(", ")));
    }
    lines.join("\n")
}

pub async fn credits_cmd(cmd: CreditsCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Getting credits for: {}", cmd.id));

    let credits = client.movie_credits(cmd.id).await;
    let limit = if cmd.limit == 0 { TOP_CAST } else { cmd.limit };

    let mut cast = credits.cast.clone();
    cast.sort_by_key(|c| c.order);
    cast.truncate(limit);

    let response = CreditsResponse {
        id: cmd.id,
        cast,
        crew: credits.crew.clone(),
    };
    print_or_fail(output, &response, |_| format_credits(&credits, limit))
}

// =============================================================================
// Genres Command
// =============================================================================

fn format_genres(genres: &[Genre]) -> String {
    if genres.is_empty() {
        return "No genres available".to_string();
    }
    genres
        .iter()
        .map(|g| format!("{:>6}  {}", g.id, g.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn genres_cmd(_cmd: GenresCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let genres = client.genres().await;
    print_or_fail(output, &genres, |g| format_genres(g))
}

// =============================================================================
// Image Command
// =============================================================================

pub fn image_cmd(cmd: ImageCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let size = ImageSize::from(cmd.size);
    let response = ImageResponse {
        url: client.image_url(cmd.path.as_deref(), size),
        path: cmd.path,
        size,
    };
    print_or_fail(output, &response, |r| r.url.clone())
}
