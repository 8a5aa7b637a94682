use crate::utils::error::{HotelError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Hotel features the provider can filter on, with its fixed numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Pool,
    FitnessCenter,
    Restaurant,
    ChildrenActivities,
    Breakfast,
    MeetingFacilities,
    Pets,
    WheelchairAccessible,
    Kitchen,
}

impl Amenity {
    pub const ALL: [Amenity; 9] = [
        Amenity::Pool,
        Amenity::FitnessCenter,
        Amenity::Restaurant,
        Amenity::ChildrenActivities,
        Amenity::Breakfast,
        Amenity::MeetingFacilities,
        Amenity::Pets,
        Amenity::WheelchairAccessible,
        Amenity::Kitchen,
    ];

    pub fn code(self) -> u8 {
        match self {
            Amenity::Pool => 1,
            Amenity::FitnessCenter => 2,
            Amenity::Restaurant => 3,
            Amenity::ChildrenActivities => 4,
            Amenity::Breakfast => 5,
            Amenity::MeetingFacilities => 6,
            Amenity::Pets => 7,
            Amenity::WheelchairAccessible => 8,
            Amenity::Kitchen => 9,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Amenity::Pool => "pool",
            Amenity::FitnessCenter => "fitness_center",
            Amenity::Restaurant => "restaurant",
            Amenity::ChildrenActivities => "children_activities",
            Amenity::Breakfast => "breakfast",
            Amenity::MeetingFacilities => "meeting_facilities",
            Amenity::Pets => "pets",
            Amenity::WheelchairAccessible => "wheelchair_accessible",
            Amenity::Kitchen => "kitchen",
        }
    }
}

impl FromStr for Amenity {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        Amenity::ALL
            .into_iter()
            .find(|amenity| amenity.tag() == tag)
            .ok_or_else(|| HotelError::invalid_request(format!("unknown amenity tag '{}'", tag)))
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Either a lookup by hotel id or a destination search.
///
/// When `hotel_id` is set every other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchQuery {
    pub hotel_id: Option<String>,
    pub location: Option<String>,
    pub results: Option<u32>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub amenities: Vec<Amenity>,
}

impl SearchQuery {
    pub fn by_id<S: Into<String>>(hotel_id: S) -> Self {
        Self {
            hotel_id: Some(hotel_id.into()),
            ..Self::default()
        }
    }

    pub fn location<S: Into<String>>(location: S) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_min_rate(mut self, rate: f64) -> Self {
        self.min_rate = Some(rate);
        self
    }

    pub fn with_max_rate(mut self, rate: f64) -> Self {
        self.max_rate = Some(rate);
        self
    }

    pub fn with_amenities<I: IntoIterator<Item = Amenity>>(mut self, amenities: I) -> Self {
        self.amenities.extend(amenities);
        self
    }

    /// Parses free-form amenity tags; the first unknown tag fails the whole query.
    pub fn with_amenity_tags<I, S>(mut self, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.amenities.push(tag.as_ref().parse()?);
        }
        Ok(self)
    }

    pub fn result_count(&self) -> u32 {
        self.results.unwrap_or(DEFAULT_RESULT_COUNT)
    }
}

/// Occupants of a single requested room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub children: u32,
    pub ages: Vec<u32>,
}

impl RoomRequest {
    pub fn new(children: u32, ages: Vec<u32>) -> Self {
        Self { children, ages }
    }
}

impl FromStr for RoomRequest {
    type Err = HotelError;

    /// `"2:8,10"` is two children aged 8 and 10; a bare `"34"` has no child count.
    fn from_str(s: &str) -> Result<Self> {
        let (children, ages) = match s.split_once(':') {
            Some((children, ages)) => {
                let children = children.trim().parse().map_err(|_| {
                    HotelError::invalid_request(format!("invalid child count in room '{}'", s))
                })?;
                (children, ages)
            }
            None => (0, s),
        };

        let ages = ages
            .split(',')
            .map(str::trim)
            .filter(|age| !age.is_empty())
            .map(|age| {
                age.parse().map_err(|_| {
                    HotelError::invalid_request(format!("invalid age '{}' in room '{}'", age, s))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        Ok(Self { children, ages })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRequest {
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub rooms: Vec<RoomRequest>,
}

impl StayRequest {
    pub fn new(arrival: NaiveDate, departure: NaiveDate, rooms: Vec<RoomRequest>) -> Self {
        Self {
            arrival,
            departure,
            rooms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub rating: Option<f64>,
    pub high_rate: Option<f64>,
    pub low_rate: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub rate_key: String,
    pub hotel_id: String,
    pub supplier_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub code: String,
    pub name: String,
}

/// Outcome of [`HotelClient::find`](crate::HotelClient::find).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FindResult {
    Single(Hotel),
    Many(Vec<Hotel>),
}

impl FindResult {
    pub fn into_hotels(self) -> Vec<Hotel> {
        match self {
            FindResult::Single(hotel) => vec![hotel],
            FindResult::Many(hotels) => hotels,
        }
    }
}
