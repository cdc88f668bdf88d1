use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use skyroute_core::airlines::booking_url;
use skyroute_core::{
    FlightRoute, FlightSegment, OfferFetcher, OfferQuery, RouteType, SupplierError,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::app_config::AmadeusConfig;

/// Seconds shaved off a token's advertised lifetime so it is never used
/// right at expiry.
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

// ============================================================================
// Token cache
// ============================================================================

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// OAuth access token owned by one client. Expiry is checked on every read.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn valid_token(&self) -> Option<String> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|t| t.expires_at > Instant::now())
            .map(|t| t.access_token.clone())
    }

    pub async fn store(&self, access_token: String, expires_in_secs: u64) {
        let lifetime = expires_in_secs.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);
        let mut guard = self.inner.write().await;
        *guard = Some(CachedToken {
            access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });
    }
}

// ============================================================================
// Wire models
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    data: Vec<RawOffer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOffer {
    id: String,
    #[serde(default)]
    validating_airline_codes: Vec<String>,
    #[serde(default)]
    itineraries: Vec<RawItinerary>,
    price: RawPrice,
}

#[derive(Debug, Deserialize)]
struct RawItinerary {
    duration: Option<String>,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSegment {
    departure: RawEndpoint,
    arrival: RawEndpoint,
    carrier_code: String,
    number: String,
    aircraft: Option<RawAircraft>,
    duration: Option<String>,
    booking_class: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndpoint {
    iata_code: String,
    at: String,
}

#[derive(Debug, Deserialize)]
struct RawAircraft {
    code: String,
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    total: String,
}

// ============================================================================
// Client
// ============================================================================

/// Flight-offer search against the Amadeus self-service API.
pub struct AmadeusClient {
    http: reqwest::Client,
    config: AmadeusConfig,
    token: TokenCache,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, SupplierError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| SupplierError::Http(e.to_string()))?;

        Ok(Self { http, config, token: TokenCache::new() })
    }

    async fn access_token(&self) -> Result<String, SupplierError> {
        if let Some(token) = self.token.valid_token().await {
            return Ok(token);
        }

        let url = format!("{}/v1/security/oauth2/token", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.api_key.as_str()),
                ("client_secret", self.config.api_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SupplierError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Auth(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SupplierError::Auth(e.to_string()))?;

        info!("Obtained Amadeus access token (expires in {}s)", token.expires_in);
        self.token.store(token.access_token.clone(), token.expires_in).await;
        Ok(token.access_token)
    }

    fn query_params(&self, query: &OfferQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("originLocationCode", query.origin.clone()),
            ("destinationLocationCode", query.destination.clone()),
            ("departureDate", query.departure_date.format("%Y-%m-%d").to_string()),
            ("adults", query.passengers.adults.to_string()),
            ("children", query.passengers.children.to_string()),
            ("infants", query.passengers.infants.to_string()),
            ("travelClass", query.cabin_class.as_upstream().to_string()),
            ("nonStop", query.non_stop.to_string()),
            ("currencyCode", self.config.currency.clone()),
            ("max", self.config.max_results.to_string()),
        ];
        if let Some(return_date) = query.return_date {
            params.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[async_trait]
impl OfferFetcher for AmadeusClient {
    async fn fetch_offers(&self, query: &OfferQuery) -> Result<Vec<FlightRoute>, SupplierError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/shopping/flight-offers", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| SupplierError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Upstream { status: status.as_u16(), body });
        }

        let body: FlightOffersResponse = response
            .json()
            .await
            .map_err(|e| SupplierError::Decode(e.to_string()))?;

        Ok(transform_offers(body, &self.config.currency))
    }
}

// ============================================================================
// Transformation
// ============================================================================

/// Convert supplier offers to routes, keeping only fares sold by the
/// airline operating the first flight.
pub fn transform_offers(response: FlightOffersResponse, currency: &str) -> Vec<FlightRoute> {
    response
        .data
        .into_iter()
        .filter(|offer| {
            offer
                .itineraries
                .first()
                .and_then(|i| i.segments.first())
                .map(|s| offer.validating_airline_codes.contains(&s.carrier_code))
                .unwrap_or(false)
        })
        .filter_map(|offer| to_route(offer, currency))
        .collect()
}

fn to_route(offer: RawOffer, currency: &str) -> Option<FlightRoute> {
    let price_amount = match parse_minor_units(&offer.price.total) {
        Some(p) => p,
        None => {
            debug!("Skipping offer {}: unparseable price '{}'", offer.id, offer.price.total);
            return None;
        }
    };

    // Only the outbound itinerary is modelled.
    let itinerary = offer.itineraries.into_iter().next()?;

    let segments: Vec<FlightSegment> = itinerary
        .segments
        .into_iter()
        .enumerate()
        .map(|(idx, seg)| FlightSegment {
            id: format!("{}-{}", offer.id, idx),
            origin: seg.departure.iata_code,
            destination: seg.arrival.iata_code,
            departure: seg.departure.at,
            arrival: seg.arrival.at,
            duration_minutes: seg.duration.as_deref().map(parse_duration).unwrap_or(0),
            flight_number: format!("{}{}", seg.carrier_code, seg.number),
            airline: seg.carrier_code,
            aircraft: seg.aircraft.map(|a| a.code),
            booking_class: seg.booking_class,
        })
        .collect();

    let first = segments.first()?;
    let last = segments.last()?;
    let departure_date = first.departure.split('T').next().unwrap_or_default();
    let link = booking_url(&first.airline, &first.origin, &last.destination, departure_date);

    Some(FlightRoute {
        id: offer.id,
        total_duration_minutes: itinerary.duration.as_deref().map(parse_duration).unwrap_or(0),
        layovers: segments.len() as u32 - 1,
        route_type: if segments.len() == 1 { RouteType::Direct } else { RouteType::Layover },
        segments,
        price_amount,
        currency: currency.to_string(),
        booking_url: link,
        is_creative_routing: false,
        price_breakdown: None,
    })
}

/// Minutes in an ISO-8601 duration such as `PT11H35M` or `P1DT2H`.
/// Malformed input yields 0.
pub fn parse_duration(iso: &str) -> u32 {
    duration_minutes(iso).unwrap_or(0)
}

fn duration_minutes(iso: &str) -> Option<u32> {
    let rest = iso.strip_prefix('P')?;

    let mut minutes = 0u32;
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' => number.push(c),
            'T' => {}
            'D' | 'H' | 'M' => {
                let value: u32 = number.parse().ok()?;
                number.clear();
                let part = match c {
                    'D' => value.checked_mul(24 * 60)?,
                    'H' => value.checked_mul(60)?,
                    _ => value,
                };
                minutes = minutes.checked_add(part)?;
            }
            _ => return None,
        }
    }
    Some(minutes)
}

/// Decimal amount string (`"546.70"`) to minor units, without going
/// through a float.
pub fn parse_minor_units(amount: &str) -> Option<i64> {
    let amount = amount.trim();
    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
      "meta": { "count": 3 },
      "data": [
        {
          "id": "1",
          "validatingAirlineCodes": ["KE"],
          "itineraries": [
            {
              "duration": "PT5H20M",
              "segments": [
                {
                  "departure": { "iataCode": "PVG", "terminal": "1", "at": "2025-03-14T08:00:00" },
                  "arrival": { "iataCode": "ICN", "terminal": "2", "at": "2025-03-14T11:05:00" },
                  "carrierCode": "KE",
                  "number": "894",
                  "aircraft": { "code": "333" },
                  "duration": "PT2H05M"
                },
                {
                  "departure": { "iataCode": "ICN", "at": "2025-03-14T12:30:00" },
                  "arrival": { "iataCode": "HND", "at": "2025-03-14T14:20:00" },
                  "carrierCode": "KE",
                  "number": "2707",
                  "duration": "PT1H50M"
                }
              ]
            }
          ],
          "price": { "currency": "USD", "total": "412.60" }
        },
        {
          "id": "2",
          "validatingAirlineCodes": ["XX"],
          "itineraries": [
            {
              "duration": "PT3H",
              "segments": [
                {
                  "departure": { "iataCode": "PVG", "at": "2025-03-14T09:00:00" },
                  "arrival": { "iataCode": "HND", "at": "2025-03-14T12:00:00" },
                  "carrierCode": "MU",
                  "number": "537",
                  "duration": "PT2H"
                }
              ]
            }
          ],
          "price": { "currency": "USD", "total": "199.00" }
        },
        {
          "id": "3",
          "validatingAirlineCodes": ["MU"],
          "itineraries": [
            {
              "duration": "PT3H",
              "segments": [
                {
                  "departure": { "iataCode": "PVG", "at": "2025-03-14T10:00:00" },
                  "arrival": { "iataCode": "HND", "at": "2025-03-14T13:00:00" },
                  "carrierCode": "MU",
                  "number": "575",
                  "duration": "PT2H"
                }
              ]
            }
          ],
          "price": { "currency": "USD", "total": "250" }
        }
      ]
    }
    "#;

    #[test]
    fn test_transform_filters_third_party_fares() {
        let response: FlightOffersResponse = serde_json::from_str(SAMPLE).unwrap();
        let routes = transform_offers(response, "USD");

        let ids: Vec<&str> = routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let connecting = &routes[0];
        assert_eq!(connecting.segments.len(), 2);
        assert_eq!(connecting.layovers, 1);
        assert_eq!(connecting.route_type, RouteType::Layover);
        assert_eq!(connecting.price_amount, 41260);
        assert_eq!(connecting.total_duration_minutes, 320);
        assert_eq!(connecting.segments[0].flight_number, "KE894");
        assert_eq!(connecting.segments[0].aircraft.as_deref(), Some("333"));
        assert_eq!(connecting.segments[1].duration_minutes, 110);
        assert!(connecting.is_contiguous());
        assert!(connecting.booking_url.contains("origin=PVG&destination=HND&departureDate=2025-03-14"));

        let nonstop = &routes[1];
        assert_eq!(nonstop.route_type, RouteType::Direct);
        assert_eq!(nonstop.price_amount, 25000);
    }

    #[test]
    fn test_missing_data_is_empty() {
        let response: FlightOffersResponse = serde_json::from_str(r#"{"meta":{"count":0}}"#).unwrap();
        assert!(transform_offers(response, "USD").is_empty());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("PT2H35M"), 155);
        assert_eq!(parse_duration("PT45M"), 45);
        assert_eq!(parse_duration("PT11H"), 660);
        assert_eq!(parse_duration("P1DT2H"), 26 * 60);
        assert_eq!(parse_duration("2H"), 0);
        assert_eq!(parse_duration("PTxH"), 0);
        assert_eq!(parse_duration("PTH"), 0);
        assert_eq!(parse_duration("P9999999DT1H"), 0);
        assert_eq!(parse_duration("PT4294967295M1M"), 0);
    }

    #[test]
    fn test_parse_minor_units() {
        assert_eq!(parse_minor_units("546.70"), Some(54670));
        assert_eq!(parse_minor_units("546.7"), Some(54670));
        assert_eq!(parse_minor_units("546"), Some(54600));
        assert_eq!(parse_minor_units(" 0.05 "), Some(5));
        assert_eq!(parse_minor_units("-12.00"), None);
        assert_eq!(parse_minor_units("12.345"), None);
        assert_eq!(parse_minor_units("abc"), None);
        assert_eq!(parse_minor_units("92233720368547758.07"), Some(i64::MAX));
        assert_eq!(parse_minor_units("92233720368547758.08"), None);
        assert_eq!(parse_minor_units("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn test_token_cache_respects_expiry() {
        let cache = TokenCache::new();
        assert!(cache.valid_token().await.is_none());

        cache.store("fresh".to_string(), 1799).await;
        assert_eq!(cache.valid_token().await.as_deref(), Some("fresh"));

        // Lifetime shorter than the safety margin is treated as already expired.
        cache.store("stale".to_string(), 30).await;
        assert!(cache.valid_token().await.is_none());
    }

    #[test]
    fn test_query_params_for_one_way_non_stop() {
        let client = AmadeusClient::new(AmadeusConfig {
            base_url: "https://test.api.amadeus.com".to_string(),
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            currency: "USD".to_string(),
            max_results: 50,
            request_timeout_seconds: 5,
        })
        .unwrap();

        let mut params = skyroute_core::SearchParams::new(
            "PVG",
            "HND",
            chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        );
        params.max_layovers = Some(0);

        let query = client.query_params(&params.to_offer_query());
        assert!(query.contains(&("nonStop", "true".to_string())));
        assert!(query.contains(&("travelClass", "ECONOMY".to_string())));
        assert!(query.contains(&("departureDate", "2025-03-14".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "returnDate"));
    }
}
