use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::model::RoomRequest;
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-adapter")]
#[command(about = "Query the hotel booking provider from the command line")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with a [provider] section")]
    pub config: Option<String>,

    #[arg(long, env = "EAN_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long, env = "EAN_CUSTOMER_ID")]
    pub customer_id: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up a single hotel by id
    Info { hotel_id: String },

    /// Search hotels around a destination
    Search {
        #[arg(long)]
        location: String,

        #[arg(long)]
        results: Option<u32>,

        #[arg(long)]
        min_rate: Option<f64>,

        #[arg(long)]
        max_rate: Option<f64>,

        #[arg(long = "amenity")]
        amenities: Vec<String>,
    },

    /// Check room availability for a hotel
    Rooms {
        hotel_id: String,

        #[arg(long)]
        arrival: NaiveDate,

        #[arg(long)]
        departure: NaiveDate,

        /// `children:age,age` or just `age,age`; repeat per room
        #[arg(long = "room", required = true)]
        rooms: Vec<RoomRequest>,
    },

    /// List accepted payment types for a hotel
    Payment { hotel_id: String },
}

impl CliConfig {
    /// Command-line flags win over the config file.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            file.provider.api_key = Some(api_key.clone());
        }
        if let Some(customer_id) = &self.customer_id {
            file.provider.customer_id = Some(customer_id.clone());
        }
        if let Some(base_url) = &self.base_url {
            file.provider.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            file.provider.timeout_seconds = Some(timeout);
        }

        file.client_config()
    }
}
