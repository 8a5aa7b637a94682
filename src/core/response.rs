use crate::core::request::Action;
use crate::domain::model::{Hotel, PaymentOption, RoomAvailability};
use crate::utils::error::{HotelError, ProviderError, Result};
use serde_json::{Map, Value};

const ERROR_KEY: &str = "EanWsErrors";

/// Normalized payload of one provider response, tagged by the action that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Information(Hotel),
    List(Vec<Hotel>),
    Availability(RoomAvailability),
    Payment(Vec<PaymentOption>),
}

pub fn parse(action: Action, raw: &str) -> Result<ProviderResponse> {
    let document: Value = serde_json::from_str(raw)?;
    tracing::debug!("🔍 Parsing {} response ({} bytes)", action.envelope(), raw.len());

    match action {
        Action::Info => parse_hotel_information(&document).map(ProviderResponse::Information),
        Action::List => parse_hotel_list(&document).map(ProviderResponse::List),
        Action::Avail => parse_room_availability(&document).map(ProviderResponse::Availability),
        Action::PaymentInfo => parse_payment_options(&document).map(ProviderResponse::Payment),
    }
}

/// Single hotel, either an already unwrapped summary or a full `HotelInformationResponse`.
pub fn parse_hotel_information(document: &Value) -> Result<Hotel> {
    if document.get("hotelId").is_some() {
        return hotel_from_summary(document, Vec::new());
    }

    let envelope = unwrap_envelope(document, Action::Info)?;
    if let Some(err) = embedded_error(envelope) {
        return Err(provider_failure(Action::Info, err));
    }

    let summary = envelope
        .get("HotelSummary")
        .ok_or_else(|| missing(Action::Info, "HotelSummary"))?;

    let image_urls = match envelope.get("HotelImages").and_then(|i| i.get("HotelImage")) {
        Some(images) => one_or_many(images)
            .into_iter()
            .map(|image| {
                image
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| missing(Action::Info, "HotelImages.HotelImage[].url"))
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    hotel_from_summary(summary, image_urls)
}

pub fn parse_hotel_list(document: &Value) -> Result<Vec<Hotel>> {
    let envelope = unwrap_envelope(document, Action::List)?;
    if let Some(err) = embedded_error(envelope) {
        return Err(provider_failure(Action::List, err));
    }

    let summaries = envelope
        .get("HotelList")
        .ok_or_else(|| missing(Action::List, "HotelList"))?
        .get("HotelSummary")
        .ok_or_else(|| missing(Action::List, "HotelList.HotelSummary"))?;

    let hotels = one_or_many(summaries)
        .into_iter()
        .map(|summary| hotel_from_summary(summary, Vec::new()))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("🔍 Mapped {} hotel summaries", hotels.len());
    Ok(hotels)
}

pub fn parse_room_availability(document: &Value) -> Result<RoomAvailability> {
    let envelope = unwrap_envelope(document, Action::Avail)?;
    if let Some(err) = embedded_error(envelope) {
        return Err(provider_failure(Action::Avail, err));
    }

    let hotel_id = id_field(envelope, "hotelId")?
        .ok_or_else(|| missing(Action::Avail, "hotelId"))?;
    let rate_key = envelope
        .get("rateKey")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(Action::Avail, "rateKey"))?
        .to_string();

    let rooms = envelope
        .get("HotelRoomResponse")
        .map(one_or_many)
        .unwrap_or_default();
    let first_room = rooms.first().ok_or_else(|| {
        HotelError::malformed("HotelRoomAvailabilityResponse.HotelRoomResponse is empty")
    })?;
    let supplier_type = first_room
        .get("supplierType")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(Action::Avail, "HotelRoomResponse[0].supplierType"))?
        .to_string();

    Ok(RoomAvailability {
        rate_key,
        hotel_id,
        supplier_type,
    })
}

/// Scans the envelope's key/value pairs for `PaymentType`; every other pair is ignored.
pub fn parse_payment_options(document: &Value) -> Result<Vec<PaymentOption>> {
    let envelope = unwrap_envelope(document, Action::PaymentInfo)?;
    let pairs = key_value_pairs(envelope)?;

    if let Some(err) = pairs
        .iter()
        .find(|(key, value)| *key == ERROR_KEY && !is_empty(value))
        .map(|(_, value)| ProviderError::from_payload((*value).clone()))
    {
        return Err(provider_failure(Action::PaymentInfo, err));
    }

    let types = match pairs.iter().find(|(key, _)| *key == "PaymentType") {
        Some((_, types)) => one_or_many(types),
        None => {
            tracing::debug!("🔍 No PaymentType entry in HotelPaymentResponse");
            Vec::new()
        }
    };

    types
        .into_iter()
        .map(|entry| -> Result<PaymentOption> {
            let text = |key: &str| {
                entry
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| missing(Action::PaymentInfo, &format!("PaymentType[].{}", key)))
            };
            Ok(PaymentOption {
                code: text("code")?,
                name: text("name")?,
            })
        })
        .collect()
}

fn hotel_from_summary(summary: &Value, image_urls: Vec<String>) -> Result<Hotel> {
    let fields = summary
        .as_object()
        .ok_or_else(|| HotelError::malformed("HotelSummary is not an object"))?;

    let id = id_field(summary, "hotelId")?
        .ok_or_else(|| HotelError::malformed("HotelSummary.hotelId is missing"))?;
    let name = optional_text(fields, "name")
        .ok_or_else(|| HotelError::malformed(format!("HotelSummary {} has no name", id)))?;
    let latitude = optional_float(fields, "latitude")?
        .ok_or_else(|| HotelError::malformed(format!("HotelSummary {} has no latitude", id)))?;
    let longitude = optional_float(fields, "longitude")?
        .ok_or_else(|| HotelError::malformed(format!("HotelSummary {} has no longitude", id)))?;

    Ok(Hotel {
        name,
        address: optional_text(fields, "address1"),
        city: optional_text(fields, "city"),
        postal_code: optional_text(fields, "postalCode"),
        country_code: optional_text(fields, "countryCode"),
        rating: optional_float(fields, "hotelRating")?,
        high_rate: optional_float(fields, "highRate")?,
        low_rate: optional_float(fields, "lowRate")?,
        latitude,
        longitude,
        image_urls,
        id,
    })
}

fn unwrap_envelope(document: &Value, action: Action) -> Result<&Value> {
    document.get(action.envelope()).ok_or_else(|| {
        HotelError::malformed(format!("response has no {} envelope", action.envelope()))
    })
}

fn embedded_error(envelope: &Value) -> Option<ProviderError> {
    envelope
        .get(ERROR_KEY)
        .filter(|errors| !is_empty(errors))
        .map(|errors| ProviderError::from_payload(errors.clone()))
}

fn provider_failure(action: Action, err: ProviderError) -> HotelError {
    tracing::warn!("⚠️ {} carries a provider error: {}", action.envelope(), err);
    HotelError::Provider(err)
}

fn missing(action: Action, path: &str) -> HotelError {
    HotelError::malformed(format!("{}.{} is missing", action.envelope(), path))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The provider collapses one-element collections into a bare object.
fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Object entries, or an array of `[key, value]` pairs.
fn key_value_pairs(envelope: &Value) -> Result<Vec<(&str, &Value)>> {
    match envelope {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([Value::String(key), value]) => Ok((key.as_str(), value)),
                _ => Err(HotelError::malformed(
                    "HotelPaymentResponse entries must be [key, value] pairs",
                )),
            })
            .collect(),
        _ => Err(HotelError::malformed(
            "HotelPaymentResponse is neither an object nor a list of pairs",
        )),
    }
}

/// Ids arrive as numbers or strings; both are held as strings.
fn id_field(source: &Value, key: &str) -> Result<Option<String>> {
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(HotelError::malformed(format!(
            "{} has unexpected value {}",
            key, other
        ))),
    }
}

fn optional_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers or numeric strings; a blank string counts as absent.
fn optional_float(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| HotelError::malformed(format!("{} '{}' is not a number", key, s))),
        Some(other) => Err(HotelError::malformed(format!(
            "{} has unexpected value {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(id: u64, name: &str) -> Value {
        json!({
            "hotelId": id,
            "name": name,
            "address1": "1 Main St",
            "city": "Seattle",
            "postalCode": "98101",
            "countryCode": "US",
            "hotelRating": 3.5,
            "highRate": 219.0,
            "lowRate": 149.0,
            "latitude": "47.6097",
            "longitude": "-122.3331",
            "shortDescription": "ignored"
        })
    }

    #[test]
    fn test_information_field_mapping() {
        let doc = json!({
            "HotelInformationResponse": {
                "@hotelId": "106347",
                "HotelSummary": summary(106347, "Seattle Grand"),
                "HotelImages": {
                    "@size": "2",
                    "HotelImage": [
                        {"url": "http://images.example.com/1.jpg", "caption": "Lobby"},
                        {"url": "http://images.example.com/2.jpg", "caption": "Pool"}
                    ]
                }
            }
        });

        let hotel = parse_hotel_information(&doc).unwrap();

        assert_eq!(hotel.id, "106347");
        assert_eq!(hotel.name, "Seattle Grand");
        assert_eq!(hotel.address.as_deref(), Some("1 Main St"));
        assert_eq!(hotel.city.as_deref(), Some("Seattle"));
        assert_eq!(hotel.postal_code.as_deref(), Some("98101"));
        assert_eq!(hotel.country_code.as_deref(), Some("US"));
        assert_eq!(hotel.rating, Some(3.5));
        assert_eq!(hotel.high_rate, Some(219.0));
        assert_eq!(hotel.low_rate, Some(149.0));
        assert_eq!(hotel.latitude, 47.6097);
        assert_eq!(hotel.longitude, -122.3331);
        assert_eq!(
            hotel.image_urls,
            vec!["http://images.example.com/1.jpg", "http://images.example.com/2.jpg"]
        );
    }

    #[test]
    fn test_information_without_images() {
        let doc = json!({
            "HotelInformationResponse": {
                "HotelSummary": summary(1, "No Pictures Inn"),
                "HotelImages": {"@size": "0"}
            }
        });
        assert!(parse_hotel_information(&doc).unwrap().image_urls.is_empty());

        let doc = json!({
            "HotelInformationResponse": {"HotelSummary": summary(1, "No Pictures Inn")}
        });
        assert!(parse_hotel_information(&doc).unwrap().image_urls.is_empty());
    }

    #[test]
    fn test_single_image_object() {
        let doc = json!({
            "HotelInformationResponse": {
                "HotelSummary": summary(1, "One Picture Inn"),
                "HotelImages": {"HotelImage": {"url": "http://images.example.com/only.jpg"}}
            }
        });
        assert_eq!(
            parse_hotel_information(&doc).unwrap().image_urls,
            vec!["http://images.example.com/only.jpg"]
        );
    }

    #[test]
    fn test_unwrapped_summary() {
        let hotel = parse_hotel_information(&summary(42, "Bare Summary")).unwrap();
        assert_eq!(hotel.id, "42");
        assert!(hotel.image_urls.is_empty());
    }

    #[test]
    fn test_error_checked_before_fields() {
        // The summary would fail field mapping if it were ever read.
        let doc = json!({
            "HotelInformationResponse": {
                "EanWsErrors": {
                    "EanError": {
                        "category": "DATA_VALIDATION",
                        "handling": "RECOVERABLE",
                        "presentationMessage": "Hotel not found."
                    }
                },
                "HotelSummary": "sentinel: not a hotel"
            }
        });

        match parse_hotel_information(&doc) {
            Err(HotelError::Provider(err)) => {
                assert_eq!(err.category.as_deref(), Some("DATA_VALIDATION"));
                assert_eq!(err.presentation_message.as_deref(), Some("Hotel not found."));
            }
            other => panic!("expected provider error, got {:?}", other),
        }

        let doc = json!({
            "HotelInformationResponse": {"HotelSummary": "sentinel: not a hotel"}
        });
        assert!(matches!(
            parse_hotel_information(&doc),
            Err(HotelError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_empty_error_member_is_ignored() {
        let doc = json!({
            "HotelInformationResponse": {
                "EanWsErrors": {},
                "HotelSummary": summary(7, "Quiet Hotel")
            }
        });
        assert_eq!(parse_hotel_information(&doc).unwrap().id, "7");
    }

    #[test]
    fn test_missing_envelope_and_required_fields() {
        assert!(matches!(
            parse_hotel_information(&json!({"Unexpected": {}})),
            Err(HotelError::MalformedResponse { .. })
        ));

        let no_name = json!({"hotelId": 1, "latitude": 1.0, "longitude": 2.0});
        assert!(matches!(
            parse_hotel_information(&no_name),
            Err(HotelError::MalformedResponse { .. })
        ));

        let bad_latitude =
            json!({"hotelId": 1, "name": "X", "latitude": "north", "longitude": 2.0});
        assert!(matches!(
            parse_hotel_information(&bad_latitude),
            Err(HotelError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_list_keeps_order() {
        let doc = json!({
            "HotelListResponse": {
                "HotelList": {
                    "@size": "3",
                    "HotelSummary": [summary(3, "C"), summary(1, "A"), summary(2, "B")]
                }
            }
        });

        let hotels = parse_hotel_list(&doc).unwrap();
        let ids: Vec<&str> = hotels.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert!(hotels.iter().all(|h| h.image_urls.is_empty()));
    }

    #[test]
    fn test_list_with_single_summary_object() {
        let doc = json!({
            "HotelListResponse": {"HotelList": {"HotelSummary": summary(9, "Only One")}}
        });
        assert_eq!(parse_hotel_list(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_list_provider_error() {
        let doc = json!({
            "HotelListResponse": {
                "EanWsErrors": {"EanError": {"presentationMessage": "No results were returned."}}
            }
        });
        assert!(matches!(parse_hotel_list(&doc), Err(HotelError::Provider(_))));
    }

    #[test]
    fn test_list_missing_hotel_list() {
        let doc = json!({"HotelListResponse": {"customerSessionId": "abc"}});
        assert!(matches!(
            parse_hotel_list(&doc),
            Err(HotelError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_availability_mapping() {
        let doc = json!({
            "HotelRoomAvailabilityResponse": {
                "hotelId": 106347,
                "rateKey": "0ABAAA7D-1C1A-2913-E702-6A5B0C0A1",
                "HotelRoomResponse": [
                    {"supplierType": "E", "rateCode": "1"},
                    {"supplierType": "V", "rateCode": "2"}
                ]
            }
        });

        let availability = parse_room_availability(&doc).unwrap();
        assert_eq!(availability.hotel_id, "106347");
        assert_eq!(availability.rate_key, "0ABAAA7D-1C1A-2913-E702-6A5B0C0A1");
        assert_eq!(availability.supplier_type, "E");
    }

    #[test]
    fn test_availability_empty_rooms_is_malformed() {
        let doc = json!({
            "HotelRoomAvailabilityResponse": {
                "hotelId": 1,
                "rateKey": "key",
                "HotelRoomResponse": []
            }
        });
        assert!(matches!(
            parse_room_availability(&doc),
            Err(HotelError::MalformedResponse { .. })
        ));

        let doc = json!({"HotelRoomAvailabilityResponse": {"hotelId": 1, "rateKey": "key"}});
        assert!(matches!(
            parse_room_availability(&doc),
            Err(HotelError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_availability_provider_error_wins() {
        let doc = json!({
            "HotelRoomAvailabilityResponse": {
                "EanWsErrors": {
                    "EanError": {
                        "handling": "RECOVERABLE",
                        "category": "SOLD_OUT",
                        "presentationMessage": "No rooms available for the requested dates."
                    }
                },
                "hotelId": 106347,
                "rateKey": "key",
                "HotelRoomResponse": [{"supplierType": "E"}]
            }
        });

        match parse_room_availability(&doc) {
            Err(HotelError::Provider(err)) => {
                assert_eq!(err.category.as_deref(), Some("SOLD_OUT"));
                assert_eq!(err.handling.as_deref(), Some("RECOVERABLE"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_payment_pairs_with_error_entry() {
        let doc = json!({
            "HotelPaymentResponse": [
                ["PaymentType", [{"code": "VI", "name": "Visa"}]],
                ["EanWsErrors", {"EanError": {"category": "AUTHENTICATION"}}]
            ]
        });

        match parse_payment_options(&doc) {
            Err(HotelError::Provider(err)) => {
                assert_eq!(err.category.as_deref(), Some("AUTHENTICATION"))
            }
            other => panic!("expected provider error, got {:?}", other),
        }

        let empty_error = json!({
            "HotelPaymentResponse": [
                ["EanWsErrors", {}],
                ["PaymentType", {"code": "VI", "name": "Visa"}]
            ]
        });
        assert_eq!(parse_payment_options(&empty_error).unwrap().len(), 1);
    }

    #[test]
    fn test_payment_object_entries_in_document_order() {
        let envelope = json!({
            "PaymentType": [],
            "customerSessionId": "abc",
            "EanWsErrors": null
        });

        let keys: Vec<&str> = key_value_pairs(&envelope)
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["PaymentType", "customerSessionId", "EanWsErrors"]);
    }

    #[test]
    fn test_payment_options_from_object() {
        let doc = json!({
            "HotelPaymentResponse": {
                "customerSessionId": "abc",
                "PaymentType": [
                    {"code": "VI", "name": "Visa"},
                    {"code": "AX", "name": "American Express"}
                ]
            }
        });

        let options = parse_payment_options(&doc).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].code, "AX");
        assert_eq!(options[1].name, "American Express");
    }

    #[test]
    fn test_payment_options_from_pairs() {
        let doc = json!({
            "HotelPaymentResponse": [
                ["foo", [{"code": "XX", "name": "Not a payment type"}]],
                ["PaymentType", [{"code": "VI", "name": "Visa"}]]
            ]
        });

        assert_eq!(
            parse_payment_options(&doc).unwrap(),
            vec![PaymentOption {
                code: "VI".to_string(),
                name: "Visa".to_string()
            }]
        );
    }

    #[test]
    fn test_payment_options_edge_cases() {
        let none = json!({"HotelPaymentResponse": {"customerSessionId": "abc"}});
        assert!(parse_payment_options(&none).unwrap().is_empty());

        let single = json!({
            "HotelPaymentResponse": {"PaymentType": {"code": "MC", "name": "Master Card"}}
        });
        assert_eq!(parse_payment_options(&single).unwrap()[0].code, "MC");

        let bad_pair = json!({"HotelPaymentResponse": [["PaymentType"]]});
        assert!(matches!(
            parse_payment_options(&bad_pair),
            Err(HotelError::MalformedResponse { .. })
        ));

        let error = json!({
            "HotelPaymentResponse": {"EanWsErrors": {"EanError": {"category": "AUTHENTICATION"}}}
        });
        assert!(matches!(parse_payment_options(&error), Err(HotelError::Provider(_))));
    }

    #[test]
    fn test_parse_dispatches_by_action() {
        let raw = r#"{"HotelPaymentResponse": {"PaymentType": []}}"#;
        assert_eq!(
            parse(Action::PaymentInfo, raw).unwrap(),
            ProviderResponse::Payment(vec![])
        );

        assert!(matches!(parse(Action::Info, "{not json"), Err(HotelError::Json(_))));
        assert!(matches!(
            parse(Action::List, raw),
            Err(HotelError::MalformedResponse { .. })
        ));
    }
}
