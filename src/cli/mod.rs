//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `trustpilot` binary.

use std::num::NonZeroU32;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{ClientConfig, DEFAULT_API_URL};

/// Trustpilot API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "trustpilot", about = "Trustpilot API CLI", version)]
pub struct Cli {
    /// Output raw JSON instead of formatted text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings, sourced from flags or the environment.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Trustpilot API key.
    #[arg(long, global = true, env = "TRUSTPILOT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the API.
    #[arg(long, global = true, env = "TRUSTPILOT_API_URL", default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Pause after every request, in milliseconds.
    #[arg(long, global = true, default_value_t = 100)]
    pub delay_ms: u64,
}

impl ConnectionArgs {
    /// Build the client configuration, or `None` when no API key was given.
    pub fn to_config(&self) -> Option<ClientConfig> {
        let api_key = self.api_key.as_deref()?;
        Some(
            ClientConfig::new(api_key)
                .with_base_url(self.base_url.clone())
                .with_timeout(Duration::from_secs(self.timeout_secs))
                .with_request_delay(Duration::from_millis(self.delay_ms)),
        )
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a business unit by domain name.
    Find {
        /// Domain to look up (e.g. example.com).
        domain: String,
    },

    /// Show details of a business unit.
    #[command(alias = "info")]
    Business {
        /// Business unit ID.
        id: String,
    },

    /// Show aggregate statistics of a business unit.
    #[command(alias = "statistics")]
    Stats {
        /// Business unit ID.
        id: String,
    },

    /// Show one page of reviews.
    Reviews {
        /// Business unit ID.
        id: String,

        /// Reviews per page (capped at 100).
        #[arg(long, default_value_t = 20)]
        per_page: u32,

        /// Page number (1-indexed).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Fetch reviews across pages and summarize their ratings.
    AllReviews {
        /// Business unit ID.
        id: String,

        /// Stop after this many pages.
        #[arg(long)]
        max_pages: Option<NonZeroU32>,
    },
}
