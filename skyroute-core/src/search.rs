use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CoreError, CoreResult};

/// Upstream shopping APIs refuse more seated passengers than this per request.
pub const MAX_SEATED_PASSENGERS: u32 = 9;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Wire form expected by the flight-offer supplier (`travelClass`).
    pub fn as_upstream(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PassengerCounts {
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self { adults: 1, children: 0, infants: 0 }
    }
}

fn default_adults() -> u32 { 1 }

/// Input to every search operation. Never mutated once accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchParams {
    #[serde(deserialize_with = "deserialize_code")]
    pub origin: String,
    #[serde(deserialize_with = "deserialize_code")]
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub passengers: PassengerCounts,
    #[serde(default)]
    pub cabin_class: CabinClass,
    /// `None` means any number of stops.
    #[serde(default)]
    pub max_layovers: Option<u32>,
    #[serde(default)]
    pub include_creative_routing: bool,
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_ascii_uppercase())
}

impl SearchParams {
    pub fn new(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_ascii_uppercase(),
            destination: destination.to_ascii_uppercase(),
            departure_date,
            return_date: None,
            passengers: PassengerCounts::default(),
            cabin_class: CabinClass::default(),
            max_layovers: None,
            include_creative_routing: false,
        }
    }

    /// Rejects requests no supplier could answer. This is the only failure
    /// that escapes a search.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, code) in [("origin", &self.origin), ("destination", &self.destination)] {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CoreError::ValidationError(format!(
                    "{} must be a 3-letter IATA code, got '{}'",
                    field, code
                )));
            }
        }

        if self.origin == self.destination {
            return Err(CoreError::ValidationError(
                "origin and destination must differ".to_string(),
            ));
        }

        let PassengerCounts { adults, children, infants } = self.passengers;
        if adults < 1 {
            return Err(CoreError::ValidationError("at least one adult is required".to_string()));
        }
        if adults.checked_add(children).map_or(true, |seated| seated > MAX_SEATED_PASSENGERS) {
            return Err(CoreError::ValidationError(format!(
                "at most {} seated passengers per search",
                MAX_SEATED_PASSENGERS
            )));
        }
        if infants > adults {
            return Err(CoreError::ValidationError(
                "each infant must travel with an adult".to_string(),
            ));
        }

        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(CoreError::ValidationError(
                    "return date is before departure date".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn non_stop_only(&self) -> bool {
        self.max_layovers == Some(0)
    }

    /// One-way copy of these params between two other endpoints, used for
    /// the separately-ticketed legs of a creative route.
    pub fn one_way_leg(&self, origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            return_date: None,
            ..self.clone()
        }
    }

    pub fn to_offer_query(&self) -> OfferQuery {
        OfferQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            passengers: self.passengers,
            cabin_class: self.cabin_class,
            non_stop: self.non_stop_only(),
        }
    }
}

/// A single origin/destination request handed to an [`crate::OfferFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: PassengerCounts,
    pub cabin_class: CabinClass,
    pub non_stop: bool,
}

impl OfferQuery {
    pub fn with_endpoints(&self, origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            ..self.clone()
        }
    }
}
