//! Basic example demonstrating the Trustpilot API client.
//!
//! Run with:
//! ```
//! TRUSTPILOT_API_KEY=your-key cargo run --example basic -- example.com
//! ```

use std::num::NonZeroU32;

use trustpilot_client::output::{render_json, BusinessView, PrettyPrint, RatingSummary, ReviewView};
use trustpilot_client::{first_business_unit_id, reviews_in, ClientConfig, TrustpilotClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("TRUSTPILOT_API_KEY").map_err(|_| {
        trustpilot_client::TrustpilotError::ConfigMissing(
            "TRUSTPILOT_API_KEY environment variable not set".to_string(),
        )
    })?;
    let domain = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "trustpilot.com".to_string());

    let client = TrustpilotClient::new(ClientConfig::new(api_key))?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Finding Business Unit for {domain} ---");
    let found = client.find_business_unit(&domain).await?;
    let Some(id) = first_business_unit_id(&found) else {
        println!("Could not find Business Unit ID");
        return Ok(());
    };
    println!("Business Unit ID: {id}");

    println!("\n--- Business Unit Details ---");
    let details = client.get_business_unit(id).await?;
    println!("{}", BusinessView(&details).pretty_print());

    println!("\n--- Business Statistics ---");
    let stats = client.get_statistics(id).await?;
    println!("{}", render_json(&stats)?);

    println!("\n--- Recent Reviews ---");
    let recent = client.get_reviews(id, 5, 1).await?;
    for review in reviews_in(&recent) {
        println!("{}", ReviewView(review).pretty_print());
    }

    // This can be a lot of data, so only the first three pages
    println!("\n--- All Reviews (first 3 pages) ---");
    let collection = client.get_all_reviews(id, NonZeroU32::new(3)).await;
    println!("{}", RatingSummary::from_reviews(&collection).pretty_print());
    if let Some(err) = &collection.stopped_early {
        println!("Stopped early after {} pages: {err}", collection.pages_fetched);
    }

    println!("\nDone!");
    Ok(())
}
