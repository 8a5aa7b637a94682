use crate::domain::model::{Amenity, RoomRequest, SearchQuery, StayRequest};
use crate::domain::ports::CredentialsProvider;
use crate::utils::error::{HotelError, Result};
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Provider date dialect for `arrivalDate` / `departureDate`.
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Everything but RFC 3986 unreserved characters and `,`, which joins multi-valued fields.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',');

/// Ordered key/value pairs; the provider is sensitive to exact parameter names.
pub type Params = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Info,
    List,
    Avail,
    PaymentInfo,
}

impl Action {
    pub fn path(self) -> &'static str {
        match self {
            Action::Info => "info",
            Action::List => "list",
            Action::Avail => "avail",
            Action::PaymentInfo => "paymentInfo",
        }
    }

    /// Top-level key the provider wraps this action's response in.
    pub fn envelope(self) -> &'static str {
        match self {
            Action::Info => "HotelInformationResponse",
            Action::List => "HotelListResponse",
            Action::Avail => "HotelRoomAvailabilityResponse",
            Action::PaymentInfo => "HotelPaymentResponse",
        }
    }
}

pub struct RequestBuilder<C: CredentialsProvider> {
    credentials: C,
}

impl<C: CredentialsProvider> RequestBuilder<C> {
    pub fn new(credentials: C) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// `<root>/<action>?apiKey=..&cid=..&<params>`; values are percent-encoded, keys are not.
    pub fn build_url(
        &self,
        action: Action,
        include_api_key: bool,
        include_customer_id: bool,
        params: &[(String, String)],
    ) -> Result<Url> {
        let mut url = self.credentials.base_url().join(action.path())?;

        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        if include_api_key {
            pairs.push(("apiKey", self.credentials.api_key()));
        }
        if include_customer_id {
            pairs.push(("cid", self.credentials.customer_id()));
        }
        pairs.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let query = pairs
            .iter()
            .map(|(key, value)| {
                format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE))
            })
            .collect::<Vec<_>>()
            .join("&");

        url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });
        Ok(url)
    }
}

pub fn hotel_info_params(hotel_id: &str) -> Result<Params> {
    if hotel_id.trim().is_empty() {
        return Err(HotelError::invalid_request("hotel id must not be empty"));
    }
    Ok(vec![("hotelId".to_string(), hotel_id.to_string())])
}

/// Translates a destination search into `list` parameters.
pub fn search_params(query: &SearchQuery) -> Result<Params> {
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .ok_or_else(|| HotelError::invalid_request("search requires a location or a hotel id"))?;

    let results = query.result_count();
    if results == 0 {
        return Err(HotelError::invalid_request("results must be at least 1"));
    }

    for (name, rate) in [("min_rate", query.min_rate), ("max_rate", query.max_rate)] {
        if let Some(rate) = rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(HotelError::invalid_request(format!(
                    "{} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }
    }
    if let (Some(min), Some(max)) = (query.min_rate, query.max_rate) {
        if min > max {
            return Err(HotelError::invalid_request(format!(
                "min_rate {} exceeds max_rate {}",
                min, max
            )));
        }
    }

    let mut params = vec![
        ("numberOfResults".to_string(), results.to_string()),
        ("destinationString".to_string(), location.to_string()),
    ];
    if let Some(min) = query.min_rate {
        params.push(("minRate".to_string(), min.to_string()));
    }
    if let Some(max) = query.max_rate {
        params.push(("maxRate".to_string(), max.to_string()));
    }
    params.push(("amenities".to_string(), encode_amenities(&query.amenities)));

    Ok(params)
}

pub fn availability_params(hotel_id: &str, stay: &StayRequest) -> Result<Params> {
    if hotel_id.trim().is_empty() {
        return Err(HotelError::invalid_request("hotel id must not be empty"));
    }
    if stay.rooms.is_empty() {
        return Err(HotelError::invalid_request("at least one room is required"));
    }
    if stay.departure <= stay.arrival {
        return Err(HotelError::invalid_request(format!(
            "departure {} must be after arrival {}",
            stay.departure, stay.arrival
        )));
    }

    let mut params: Params = stay
        .rooms
        .iter()
        .enumerate()
        .map(|(n, room)| (format!("room{}", n + 1), encode_room(room)))
        .collect();
    params.push(("arrivalDate".to_string(), format_date(stay.arrival)));
    params.push(("departureDate".to_string(), format_date(stay.departure)));
    params.push(("hotelId".to_string(), hotel_id.to_string()));

    Ok(params)
}

/// Comma-joined provider codes in caller order.
pub fn encode_amenities(amenities: &[Amenity]) -> String {
    amenities
        .iter()
        .map(|amenity| amenity.code().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// `"{children},"` (omitted when zero) followed by the comma-joined ages.
pub fn encode_room(room: &RoomRequest) -> String {
    let ages = room
        .ages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    if room.children == 0 {
        ages
    } else {
        format!("{},{}", room.children, ages)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Copy of `url` safe to log.
pub fn redacted(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "apiKey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
