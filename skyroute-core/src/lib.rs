pub mod search;
pub mod route;
pub mod iata;
pub mod airlines;
pub mod region;
pub mod supplier;

pub use route::{
    CreativeRoutingOption, FlightRoute, FlightSegment, PriceBreakdown, RouteType, Savings,
    SearchComparison,
};
pub use search::{CabinClass, OfferQuery, PassengerCounts, SearchParams};
pub use region::Region;
pub use supplier::{OfferFetcher, SupplierError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
