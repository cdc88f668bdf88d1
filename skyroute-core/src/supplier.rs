use async_trait::async_trait;

use crate::route::FlightRoute;
use crate::search::OfferQuery;

#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    #[error("Transport error: {0}")]
    Http(String),
    #[error("Authentication with supplier failed: {0}")]
    Auth(String),
    #[error("Supplier returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Could not decode supplier response: {0}")]
    Decode(String),
}

/// Source of priced itineraries for a single origin/destination pair.
///
/// Implementations normalize every price to one currency, return an empty
/// list when the pair has no offers, and own their timeouts and retries.
#[async_trait]
pub trait OfferFetcher: Send + Sync {
    async fn fetch_offers(&self, query: &OfferQuery) -> Result<Vec<FlightRoute>, SupplierError>;
}
