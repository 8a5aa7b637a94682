pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::http::ReqwestTransport;
pub use crate::config::{toml_config::TomlConfig, ClientConfig};
pub use crate::core::{client::HotelClient, request::Action, response::ProviderResponse};
pub use crate::domain::model::{
    Amenity, FindResult, Hotel, PaymentOption, RoomAvailability, RoomRequest, SearchQuery,
    StayRequest,
};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::{HotelError, ProviderError, Result};
