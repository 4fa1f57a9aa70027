//! CLI - Command Line Interface for CineSearch
//!
//! Every browse action of the TUI is scriptable. All output is JSON-parseable
//! with `--json` (the default when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! # Search by title, or browse with filters
//! cinesearch search "the batman" --json
//! cinesearch discover --genre 878 --year 1982 --sort vote-average-desc
//!
//! # Details and credits
//! cinesearch info 414906
//! cinesearch credits 414906 --limit 5
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{ImageSize, MovieSummary, SearchFilters, SortKey};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error (configuration, output)
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Movie not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// CineSearch - discover movies from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinesearch",
    version,
    about = "Search, filter and browse movies from TMDB",
    long_about = "A neon terminal interface for searching, filtering and \
                  browsing movies, with cast and crew details.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.\n\n\
                  Credentials: set TMDB_API_KEY or TMDB_READ_ACCESS_TOKEN, \
                  or add tmdb_api_key to the config file.",
    after_help = "EXAMPLES:\n\
                  cinesearch                              Launch interactive TUI\n\
                  cinesearch search \"blade runner\"        Search by title\n\
                  cinesearch discover --genre 28 -y 2008  Browse with filters\n\
                  cinesearch info 414906 --json           Movie details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search by title; falls back to discover/popular without a query
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Currently popular movies
    #[command(visible_alias = "pop")]
    Popular(PopularCmd),

    /// Browse movies by filters
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// Movie details with director and top cast
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Full cast and key crew
    Credits(CreditsCmd),

    /// List movie genres
    #[command(visible_alias = "g")]
    Genres(GenresCmd),

    /// Resolve an image path to a URL
    Image(ImageCmd),
}

// =============================================================================
// Filter Arguments
// =============================================================================

/// Discover filters shared by `search` and `discover`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Genre ID (see `cinesearch genres`)
    #[arg(long, short = 'g')]
    pub genre: Option<u32>,

    /// Release year
    #[arg(long, short = 'y', value_parser = clap::value_parser!(u16).range(1870..=2200))]
    pub year: Option<u16>,

    /// Minimum vote average (0-10)
    #[arg(long, short = 'r', value_parser = parse_rating)]
    pub min_rating: Option<f32>,

    /// Sort order
    #[arg(long, short = 'o', value_enum)]
    pub sort: Option<SortArg>,

    /// Original language (ISO 639-1, e.g. "en")
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            genre: self.genre,
            year: self.year,
            min_rating: self.min_rating,
            sort: self.sort.map(SortKey::from),
            language: self
                .language
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_lowercase),
        }
    }
}

fn parse_rating(s: &str) -> Result<f32, String> {
    let rating: f32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=10.0).contains(&rating) {
        Ok(rating)
    } else {
        Err("rating must be between 0 and 10".to_string())
    }
}

/// Sort order for discover
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Most popular first (default)
    PopularityDesc,
    /// Least popular first
    PopularityAsc,
    /// Highest rated first
    VoteAverageDesc,
    /// Lowest rated first
    VoteAverageAsc,
    /// Newest first
    ReleaseDateDesc,
    /// Oldest first
    ReleaseDateAsc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PopularityDesc => SortKey::PopularityDesc,
            SortArg::PopularityAsc => SortKey::PopularityAsc,
            SortArg::VoteAverageDesc => SortKey::VoteAverageDesc,
            SortArg::VoteAverageAsc => SortKey::VoteAverageAsc,
            SortArg::ReleaseDateDesc => SortKey::ReleaseDateDesc,
            SortArg::ReleaseDateAsc => SortKey::ReleaseDateAsc,
        }
    }
}

fn page_arg() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=crate::models::MAX_PAGES as i64)
}

// =============================================================================
// Listing Commands
// =============================================================================

/// Search movies; without a query, filters browse via discover
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    pub query: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Result page
    #[arg(long, short = 'p', default_value = "1", value_parser = page_arg())]
    pub page: u32,
}

/// Currently popular movies
#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Result page
    #[arg(long, short = 'p', default_value = "1", value_parser = page_arg())]
    pub page: u32,
}

/// Browse movies by filters
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Result page
    #[arg(long, short = 'p', default_value = "1", value_parser = page_arg())]
    pub page: u32,
}

// =============================================================================
// Movie Commands
// =============================================================================

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 414906)
    #[arg(required = true)]
    pub id: u64,
}

/// Cast and crew for a movie
#[derive(Args, Debug)]
pub struct CreditsCmd {
    /// TMDB movie ID
    #[arg(required = true)]
    pub id: u64,

    /// Number of billed cast members to show
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,
}

/// List movie genres
#[derive(Args, Debug)]
pub struct GenresCmd {}

/// Build an image URL from a TMDB image path
#[derive(Args, Debug)]
pub struct ImageCmd {
    /// Image path as returned by the API (e.g., /abc.jpg); omit for placeholder
    pub path: Option<String>,

    /// Image width
    #[arg(long, short = 's', value_enum, default_value = "w500")]
    pub size: SizeArg,
}

/// Image width for `image`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeArg {
    W200,
    W300,
    #[default]
    W500,
    W780,
    Original,
}

impl From<SizeArg> for ImageSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::W200 => ImageSize::W200,
            SizeArg::W300 => ImageSize::W300,
            SizeArg::W500 => ImageSize::W500,
            SizeArg::W780 => ImageSize::W780,
            SizeArg::Original => ImageSize::Original,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// One page of a listing, with the endpoint that served it
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponse {
    pub source: String,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub summary: String,
    pub results: Vec<MovieSummary>,
}

/// Resolved image URL
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub path: Option<String>,
    pub size: ImageSize,
    pub url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data: JSON envelope, or the human rendering
    pub fn print<T: Serialize>(&self, data: &T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
