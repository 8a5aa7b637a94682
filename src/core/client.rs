use crate::adapters::http::ReqwestTransport;
use crate::config::ClientConfig;
use crate::core::request::{
    availability_params, hotel_info_params, redacted, search_params, Action, RequestBuilder,
};
use crate::core::response::{
    parse_hotel_information, parse_hotel_list, parse_payment_options, parse_room_availability,
};
use crate::domain::model::{
    FindResult, Hotel, PaymentOption, RoomAvailability, SearchQuery, StayRequest,
};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::Value;

/// Request builder, transport and normalizer wired together.
///
/// Holds nothing but immutable configuration, so one client can serve concurrent calls.
pub struct HotelClient<T: Transport = ReqwestTransport> {
    requests: RequestBuilder<ClientConfig>,
    transport: T,
}

impl HotelClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(&config);
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> HotelClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            requests: RequestBuilder::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.requests.credentials()
    }

    /// Lookup by id when `hotel_id` is set, destination search otherwise.
    pub async fn find(&self, query: &SearchQuery) -> Result<FindResult> {
        match query.hotel_id.as_deref() {
            Some(hotel_id) => self.find_by_id(hotel_id).await.map(FindResult::Single),
            None => self.search(query).await.map(FindResult::Many),
        }
    }

    pub async fn find_by_id(&self, hotel_id: &str) -> Result<Hotel> {
        let params = hotel_info_params(hotel_id)?;
        let document = self.fetch(Action::Info, &params).await?;
        let hotel = parse_hotel_information(&document)?;

        tracing::info!("🏨 Loaded hotel {} ({})", hotel.id, hotel.name);
        Ok(hotel)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Hotel>> {
        let params = search_params(query)?;
        let document = self.fetch(Action::List, &params).await?;
        let hotels = parse_hotel_list(&document)?;

        tracing::info!("🏨 Search returned {} hotels", hotels.len());
        Ok(hotels)
    }

    pub async fn find_room_availability(
        &self,
        hotel: &Hotel,
        stay: &StayRequest,
    ) -> Result<RoomAvailability> {
        let params = availability_params(&hotel.id, stay)?;
        let document = self.fetch(Action::Avail, &params).await?;
        let availability = parse_room_availability(&document)?;

        tracing::info!(
            "🛏️ Hotel {} has availability from supplier {}",
            availability.hotel_id,
            availability.supplier_type
        );
        Ok(availability)
    }

    /// Payment types are account-wide, so no hotel parameter goes on the wire.
    pub async fn list_payment_options(&self, hotel: &Hotel) -> Result<Vec<PaymentOption>> {
        let document = self.fetch(Action::PaymentInfo, &[]).await?;
        let options = parse_payment_options(&document)?;

        tracing::info!("💳 {} payment options for hotel {}", options.len(), hotel.id);
        Ok(options)
    }

    async fn fetch(&self, action: Action, params: &[(String, String)]) -> Result<Value> {
        let url = self.requests.build_url(action, true, true, params)?;
        tracing::debug!("📡 Making API request to: {}", redacted(&url));

        let body = self.transport.get(&url).await?;
        tracing::debug!("📡 Received {} bytes for {}", body.len(), action.path());

        Ok(serde_json::from_str(&body)?)
    }
}
