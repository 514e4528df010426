//! Trustpilot API CLI binary.
//!
//! A command-line interface for querying the Trustpilot public API.

use std::process::ExitCode;

use clap::Parser;
use tabled::Table;
use thiserror::Error;
use tracing::Level;
use trustpilot_client::cli::{Cli, Command};
use trustpilot_client::output::{
    render_json, BusinessView, OutputError, PrettyPrint, RatingSummary, ReviewRow,
};
use trustpilot_client::{reviews_in, Payload, TrustpilotClient, TrustpilotError};

/// Failure of a CLI command: either the API call or rendering its result.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] TrustpilotError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let Some(config) = cli.connection.to_config() else {
        eprintln!("Error: no API key provided");
        eprintln!("Hint: Set TRUSTPILOT_API_KEY or pass --api-key");
        return ExitCode::FAILURE;
    };

    let client = match TrustpilotClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command, cli.json).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    client: &TrustpilotClient,
    command: Command,
    json: bool,
) -> Result<ExitCode, CliError> {
    match command {
        Command::Find { domain } => {
            let found = client.find_business_unit(&domain).await?;
            if json {
                print_json(&found)?;
            } else {
                print_business_units(&found);
            }
        }
        Command::Business { id } => {
            let details = client.get_business_unit(&id).await?;
            if json {
                print_json(&details)?;
            } else {
                println!("{}", BusinessView(&details).pretty_print());
            }
        }
        Command::Stats { id } => {
            // Statistics have no fixed shape worth tabulating
            print_json(&client.get_statistics(&id).await?)?;
        }
        Command::Reviews { id, per_page, page } => {
            let response = client.get_reviews(&id, per_page, page).await?;
            if json {
                print_json(&response)?;
            } else {
                let rows: Vec<ReviewRow> = reviews_in(&response).iter().map(ReviewRow::from).collect();
                println!("{}", Table::new(rows));
                println!("\nPage {page}");
            }
        }
        Command::AllReviews { id, max_pages } => {
            let collection = client.get_all_reviews(&id, max_pages).await;
            if json {
                print_json(&collection.reviews)?;
            } else {
                println!("{}", RatingSummary::from_reviews(&collection).pretty_print());
                println!("Pages fetched:         {}", collection.pages_fetched);
            }
            if let Some(err) = &collection.stopped_early {
                eprintln!(
                    "Warning: stopped after {} page(s), results are incomplete: {err}",
                    collection.pages_fetched
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), OutputError> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn print_business_units(found: &Payload) {
    let units = found
        .get("businessUnits")
        .and_then(Payload::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if units.is_empty() {
        println!("No business units found");
        return;
    }

    for unit in units {
        let id = unit.get("id").and_then(Payload::as_str).unwrap_or("N/A");
        let name = unit
            .get("displayName")
            .and_then(Payload::as_str)
            .unwrap_or("N/A");
        println!("{id}  {name}");
    }
}
