use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use skyroute_core::{
    FlightRoute, FlightSegment, OfferFetcher, OfferQuery, RouteType, SearchParams, SupplierError,
};

/// Build a supplier-style route from `(origin, destination, departure)` legs.
pub fn route(id: &str, legs: &[(&str, &str, &str)], price_amount: i64) -> FlightRoute {
    let segments: Vec<FlightSegment> = legs
        .iter()
        .enumerate()
        .map(|(idx, (origin, destination, departure))| FlightSegment {
            id: format!("{}-{}", id, idx),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure: departure.to_string(),
            arrival: departure.to_string(),
            duration_minutes: 120,
            airline: "KE".to_string(),
            flight_number: format!("KE{}", 800 + idx),
            aircraft: None,
            booking_class: None,
        })
        .collect();

    FlightRoute {
        id: id.to_string(),
        total_duration_minutes: 120 * segments.len() as u32,
        layovers: segments.len() as u32 - 1,
        route_type: if segments.len() == 1 { RouteType::Direct } else { RouteType::Layover },
        segments,
        price_amount,
        currency: "USD".to_string(),
        booking_url: format!("https://book.example/{}", id),
        is_creative_routing: false,
        price_breakdown: None,
    }
}

pub fn params(origin: &str, destination: &str) -> SearchParams {
    SearchParams::new(origin, destination, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
}

/// Scripted supplier: answers per origin/destination pair and records
/// every query it receives. Unscripted pairs have no offers.
#[derive(Default)]
pub struct StubFetcher {
    offers: HashMap<(String, String), Vec<FlightRoute>>,
    failures: Vec<(String, String)>,
    calls: Mutex<Vec<OfferQuery>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offers(mut self, origin: &str, destination: &str, routes: Vec<FlightRoute>) -> Self {
        self.offers.insert((origin.to_string(), destination.to_string()), routes);
        self
    }

    pub fn with_failure(mut self, origin: &str, destination: &str) -> Self {
        self.failures.push((origin.to_string(), destination.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<OfferQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OfferFetcher for StubFetcher {
    async fn fetch_offers(&self, query: &OfferQuery) -> Result<Vec<FlightRoute>, SupplierError> {
        self.calls.lock().unwrap().push(query.clone());

        let pair = (query.origin.clone(), query.destination.clone());
        if self.failures.contains(&pair) {
            return Err(SupplierError::Upstream { status: 429, body: "rate limited".to_string() });
        }
        Ok(self.offers.get(&pair).cloned().unwrap_or_default())
    }
}
