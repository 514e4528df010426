//! CLI argument parsing tests.

use std::time::Duration;

use clap::Parser;
use trustpilot_client::cli::{Cli, Command};

#[test]
fn test_cli_parses_find_subcommand() {
    let cli = Cli::parse_from(["trustpilot", "--api-key", "k", "find", "example.com"]);

    assert!(!cli.json);
    match cli.command {
        Command::Find { domain } => assert_eq!(domain, "example.com"),
        _ => panic!("Expected Find command"),
    }
}

#[test]
fn test_cli_parses_business_and_alias() {
    let cli = Cli::parse_from(["trustpilot", "business", "bu-1"]);
    assert!(matches!(cli.command, Command::Business { ref id } if id == "bu-1"));

    let cli = Cli::parse_from(["trustpilot", "info", "bu-1"]);
    assert!(matches!(cli.command, Command::Business { .. }));

    let cli = Cli::parse_from(["trustpilot", "statistics", "bu-1"]);
    assert!(matches!(cli.command, Command::Stats { .. }));
}

#[test]
fn test_reviews_defaults_and_overrides() {
    let cli = Cli::parse_from(["trustpilot", "reviews", "bu-1"]);
    match cli.command {
        Command::Reviews { id, per_page, page } => {
            assert_eq!(id, "bu-1");
            assert_eq!(per_page, 20);
            assert_eq!(page, 1);
        }
        _ => panic!("Expected Reviews command"),
    }

    let cli = Cli::parse_from(["trustpilot", "reviews", "bu-1", "--per-page", "50", "--page", "3"]);
    match cli.command {
        Command::Reviews { per_page, page, .. } => {
            assert_eq!(per_page, 50);
            assert_eq!(page, 3);
        }
        _ => panic!("Expected Reviews command"),
    }
}

#[test]
fn test_all_reviews_max_pages() {
    let cli = Cli::parse_from(["trustpilot", "all-reviews", "bu-1", "--max-pages", "3"]);
    match cli.command {
        Command::AllReviews { id, max_pages } => {
            assert_eq!(id, "bu-1");
            assert_eq!(max_pages.map(|n| n.get()), Some(3));
        }
        _ => panic!("Expected AllReviews command"),
    }

    let cli = Cli::parse_from(["trustpilot", "all-reviews", "bu-1"]);
    assert!(matches!(cli.command, Command::AllReviews { max_pages: None, .. }));
}

#[test]
fn test_zero_max_pages_rejected() {
    let result = Cli::try_parse_from(["trustpilot", "all-reviews", "bu-1", "--max-pages", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags() {
    // --json before subcommand
    let cli = Cli::parse_from(["trustpilot", "--json", "stats", "bu-1"]);
    assert!(cli.json);

    // --json and --verbose after subcommand (global flags)
    let cli = Cli::parse_from(["trustpilot", "stats", "bu-1", "--json", "--verbose"]);
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_connection_args_build_config() {
    let cli = Cli::parse_from([
        "trustpilot",
        "find",
        "example.com",
        "--api-key",
        "secret",
        "--base-url",
        "http://localhost:9000/v1",
        "--timeout-secs",
        "5",
        "--delay-ms",
        "0",
    ]);

    let config = cli.connection.to_config().expect("API key was given");
    assert_eq!(config.api_key(), "secret");
    assert_eq!(config.base_url(), "http://localhost:9000/v1");
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.request_delay(), Duration::ZERO);
}
