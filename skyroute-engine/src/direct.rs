use std::sync::Arc;

use futures_util::future::join_all;
use skyroute_core::iata::expand_city_code;
use skyroute_core::{FlightRoute, OfferFetcher, OfferQuery, SearchParams};
use tracing::{debug, warn};

/// Query the supplier for one airport pair. A failed request counts as a
/// pair with no offers.
pub async fn fetch_or_empty(fetcher: &dyn OfferFetcher, query: &OfferQuery) -> Vec<FlightRoute> {
    match fetcher.fetch_offers(query).await {
        Ok(routes) => {
            debug!(
                "{} -> {}: {} offers",
                query.origin,
                query.destination,
                routes.len()
            );
            routes
        }
        Err(e) => {
            warn!(
                "Offer fetch {} -> {} failed, treating as no offers: {}",
                query.origin, query.destination, e
            );
            Vec::new()
        }
    }
}

/// Direct and connecting itineraries across every airport of the searched
/// city codes.
pub struct DirectSearch {
    fetcher: Arc<dyn OfferFetcher>,
}

impl DirectSearch {
    pub fn new(fetcher: Arc<dyn OfferFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch one supplier request per (origin airport, destination airport)
    /// pair concurrently and concatenate the results, unranked.
    pub async fn search(&self, params: &SearchParams) -> Vec<FlightRoute> {
        let origins = expand_city_code(&params.origin);
        let destinations = expand_city_code(&params.destination);
        let base = params.to_offer_query();

        let queries: Vec<OfferQuery> = origins
            .iter()
            .flat_map(|o| destinations.iter().map(move |d| (o, d)))
            .map(|(o, d)| base.with_endpoints(o, d))
            .collect();

        if queries.len() > 1 {
            debug!(
                "Expanded {} -> {} into {} airport pairs",
                params.origin,
                params.destination,
                queries.len()
            );
        }

        let fetcher = self.fetcher.as_ref();
        join_all(queries.iter().map(|q| fetch_or_empty(fetcher, q)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
