use serde::{Deserialize, Serialize};

/// One operated flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightSegment {
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Local timestamps exactly as the supplier reported them.
    pub departure: String,
    pub arrival: String,
    pub duration_minutes: u32,
    pub airline: String,
    pub flight_number: String,
    pub aircraft: Option<String>,
    pub booking_class: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteType {
    Direct,
    Layover,
    MultiCity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub segment_prices: Vec<i64>,
    pub total_price: i64,
}

/// A priced itinerary. Prices are minor units of `currency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightRoute {
    pub id: String,
    pub segments: Vec<FlightSegment>,
    pub total_duration_minutes: u32,
    pub layovers: u32,
    pub price_amount: i64,
    pub currency: String,
    pub booking_url: String,
    pub route_type: RouteType,
    #[serde(default)]
    pub is_creative_routing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_breakdown: Option<PriceBreakdown>,
}

impl FlightRoute {
    /// Identity of the physical itinerary, independent of which query
    /// produced it. Departure timestamps are compared as literal strings.
    pub fn identity_key(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("{}-{}-{}", s.origin, s.destination, s.departure))
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.origin.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.segments.last().map(|s| s.destination.as_str())
    }

    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].destination == pair[1].origin)
    }
}

/// A split-ticket plan through one hub. Each constituent route must be
/// booked on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreativeRoutingOption {
    pub hub: String,
    pub routes: Vec<FlightRoute>,
    pub total_price: i64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Savings {
    pub amount: i64,
    pub percentage: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchComparison {
    pub direct_flights: Vec<FlightRoute>,
    pub creative_routes: Vec<CreativeRoutingOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Savings>,
}
