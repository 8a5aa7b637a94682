use anyhow::Context;
use clap::Parser;
use hotel_adapter::config::cli::Command;
use hotel_adapter::utils::error::ErrorCategory;
use hotel_adapter::utils::logger;
use hotel_adapter::{CliConfig, HotelClient, SearchQuery, StayRequest};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hotel-adapter CLI");

    let config = cli
        .client_config()
        .context("failed to load provider configuration")?;
    if cli.verbose {
        tracing::debug!("Client config: {:?}", config);
    }
    let client = HotelClient::new(config)?;

    let outcome: hotel_adapter::Result<String> = async {
        match &cli.command {
            Command::Info { hotel_id } => to_json(&client.find_by_id(hotel_id).await?),
            Command::Search {
                location,
                results,
                min_rate,
                max_rate,
                amenities,
            } => {
                let mut query =
                    SearchQuery::location(location.as_str()).with_amenity_tags(amenities)?;
                query.results = *results;
                query.min_rate = *min_rate;
                query.max_rate = *max_rate;
                to_json(&client.find(&query).await?)
            }
            Command::Rooms {
                hotel_id,
                arrival,
                departure,
                rooms,
            } => {
                let stay = StayRequest::new(*arrival, *departure, rooms.clone());
                let hotel = client.find_by_id(hotel_id).await?;
                to_json(&client.find_room_availability(&hotel, &stay).await?)
            }
            Command::Payment { hotel_id } => {
                let hotel = client.find_by_id(hotel_id).await?;
                to_json(&client.list_payment_options(&hotel).await?)
            }
        }
    }
    .await;

    match outcome {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            let exit_code = match e.category() {
                ErrorCategory::Request | ErrorCategory::Config => 2,
                ErrorCategory::Provider => 3,
                ErrorCategory::Response | ErrorCategory::Transport => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> hotel_adapter::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
