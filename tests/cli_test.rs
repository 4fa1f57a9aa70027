//! CLI Command Tests
//!
//! Argument parsing, JSON envelopes, and command handlers run against a
//! mocked TMDB server. Handlers print to stdout; these tests check exit codes.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use cinesearch::cli::{Cli, Command, SizeArg, SortArg};
    use cinesearch::models::SortKey;

    #[test]
    fn test_discover_command() {
        let cli = Cli::parse_from([
            "cinesearch",
            "discover",
            "-g",
            "878",
            "-r",
            "7.5",
            "-o",
            "release-date-asc",
            "-p",
            "2",
        ]);
        match cli.command {
            Some(Command::Discover(cmd)) => {
                assert_eq!(cmd.page, 2);
                assert_eq!(cmd.filters.sort, Some(SortArg::ReleaseDateAsc));
                let filters = cmd.filters.to_filters();
                assert_eq!(filters.genre, Some(878));
                assert_eq!(filters.min_rating, Some(7.5));
                assert_eq!(filters.sort, Some(SortKey::ReleaseDateAsc));
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_popular_default_page() {
        let cli = Cli::parse_from(["cinesearch", "popular"]);
        match cli.command {
            Some(Command::Popular(cmd)) => assert_eq!(cmd.page, 1),
            _ => panic!("Expected Popular command"),
        }
    }

    #[test]
    fn test_page_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["cinesearch", "popular", "-p", "0"]).is_err());
        assert!(Cli::try_parse_from(["cinesearch", "popular", "-p", "501"]).is_err());
        assert!(Cli::try_parse_from(["cinesearch", "popular", "-p", "500"]).is_ok());
    }

    #[test]
    fn test_credits_command() {
        let cli = Cli::parse_from(["cinesearch", "credits", "550", "-n", "5"]);
        match cli.command {
            Some(Command::Credits(cmd)) => {
                assert_eq!(cmd.id, 550);
                assert_eq!(cmd.limit, 5);
            }
            _ => panic!("Expected Credits command"),
        }
    }

    #[test]
    fn test_image_size_values() {
        let cli = Cli::parse_from(["cinesearch", "image", "/a.jpg", "-s", "original"]);
        match cli.command {
            Some(Command::Image(cmd)) => assert_eq!(cmd.size, SizeArg::Original),
            _ => panic!("Expected Image command"),
        }
        assert!(Cli::try_parse_from(["cinesearch", "image", "-s", "w9000"]).is_err());
    }

    #[test]
    fn test_info_requires_numeric_id() {
        assert!(Cli::try_parse_from(["cinesearch", "info"]).is_err());
        assert!(Cli::try_parse_from(["cinesearch", "info", "tt1856101"]).is_err());
    }
}

// =============================================================================
// JSON Output Format Tests
// =============================================================================

mod json_output {
    use cinesearch::cli::{ExitCode, JsonOutput};
    use cinesearch::commands::listing_response;
    use cinesearch::models::{MovieSummary, ResultPage};

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success("test data");
        let json = serde_json::to_string(&output).unwrap();

        assert!(json.contains("\"data\":\"test data\""));
        assert!(!json.contains("error"));
        assert!(!json.contains("exit_code")); // Should be omitted when 0
    }

    #[test]
    fn test_json_output_error() {
        let output = JsonOutput::<()>::error_msg("Movie 1 not found", ExitCode::NotFound);
        let json = serde_json::to_string(&output).unwrap();

        assert!(json.contains("\"error\":\"Movie 1 not found\""));
        assert!(json.contains("\"exit_code\":4"));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_listing_json_shape() {
        let page = ResultPage {
            page: 1,
            results: vec![MovieSummary {
                id: 603,
                title: "The Matrix".into(),
                release_date: "1999-03-30".into(),
                vote_average: 8.2,
                ..Default::default()
            }],
            total_pages: 1,
            total_results: 1,
        };
        let listing = listing_response("search", 1, page);
        let value = serde_json::to_value(JsonOutput::success(&listing)).unwrap();

        assert_eq!(value["data"]["source"], "search");
        assert_eq!(value["data"]["summary"], "Showing 1-1 of 1 results");
        assert_eq!(value["data"]["results"][0]["id"], 603);
        assert_eq!(value["data"]["results"][0]["title"], "The Matrix");
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use clap::Parser;
    use cinesearch::api::TmdbClient;
    use cinesearch::cli::{Cli, Command, ExitCode, Output};
    use cinesearch::commands;
    use mockito::{Matcher, Server};

    const EMPTY_PAGE: &str =
        r#"{"page": 1, "results": [], "total_results": 0, "total_pages": 0}"#;

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["cinesearch"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command.expect("subcommand")
    }

    #[tokio::test]
    async fn test_search_without_query_uses_discover() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/discover/movie")
            .match_query(Matcher::UrlEncoded("year".into(), "1999".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EMPTY_PAGE)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let Command::Search(cmd) = parse(&["search", "-y", "1999"]) else {
            panic!("Expected Search command");
        };
        let code = commands::search_cmd(cmd, &client, &quiet_json()).await;

        assert_eq!(code, ExitCode::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_with_query_ignores_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search/movie")
            .match_query(Matcher::UrlEncoded("query".into(), "matrix".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EMPTY_PAGE)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let Command::Search(cmd) = parse(&["search", "matrix", "-g", "28"]) else {
            panic!("Expected Search command");
        };
        let code = commands::search_cmd(cmd, &client, &quiet_json()).await;

        assert_eq!(code, ExitCode::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_listing_survives_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/movie/popular")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let Command::Popular(cmd) = parse(&["popular"]) else {
            panic!("Expected Popular command");
        };
        let code = commands::popular_cmd(cmd, &client, &quiet_json()).await;

        // fallback page, not an error
        assert_eq!(code, ExitCode::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_info_not_found_exit_code() {
        let mut server = Server::new_async().await;
        let detail = server
            .mock("GET", "/movie/42")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;
        let credits = server
            .mock("GET", "/movie/42/credits")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let Command::Info(cmd) = parse(&["info", "42"]) else {
            panic!("Expected Info command");
        };
        let code = commands::info_cmd(cmd, &client, &quiet_json()).await;

        assert_eq!(code, ExitCode::NotFound);
        detail.assert_async().await;
        credits.assert_async().await;
    }

    #[tokio::test]
    async fn test_info_success() {
        let mut server = Server::new_async().await;
        let _detail = server
            .mock("GET", "/movie/603")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-30", "runtime": 136}"#)
            .create_async()
            .await;
        let _credits = server
            .mock("GET", "/movie/603/credits")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let Command::Info(cmd) = parse(&["info", "603"]) else {
            panic!("Expected Info command");
        };
        let code = commands::info_cmd(cmd, &client, &quiet_json()).await;

        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_genres_and_credits() {
        let mut server = Server::new_async().await;
        let _genres = server
            .mock("GET", "/genre/movie/list")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"genres": [{"id": 18, "name": "Drama"}]}"#)
            .create_async()
            .await;
        let _credits = server
            .mock("GET", "/movie/550/credits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"cast": [{"id": 819, "name": "Edward Norton", "character": "Narrator", "order": 0}], "crew": []}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("test_key", server.url());
        let output = quiet_json();

        let Command::Genres(cmd) = parse(&["genres"]) else {
            panic!("Expected Genres command");
        };
        assert_eq!(commands::genres_cmd(cmd, &client, &output).await, ExitCode::Success);

        let Command::Credits(cmd) = parse(&["credits", "550"]) else {
            panic!("Expected Credits command");
        };
        assert_eq!(commands::credits_cmd(cmd, &client, &output).await, ExitCode::Success);
    }

    #[test]
    fn test_image_needs_no_network() {
        let client = TmdbClient::with_base_url("test_key", "http://127.0.0.1:1");
        let Command::Image(cmd) = parse(&["image"]) else {
            panic!("Expected Image command");
        };
        assert_eq!(commands::image_cmd(cmd, &client, &quiet_json()), ExitCode::Success);
    }
}
