use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skyroute_core::{
    CoreResult, CreativeRoutingOption, FlightRoute, OfferFetcher, SearchComparison, SearchParams,
};
use tracing::info;

use crate::comparison::compare;
use crate::creative::{CreativeRouteAssembler, DEFAULT_MAX_HUB_CANDIDATES};
use crate::direct::DirectSearch;
use crate::ranker::dedupe_and_rank;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Leading hub candidates probed for split tickets.
    pub max_hub_candidates: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_hub_candidates: DEFAULT_MAX_HUB_CANDIDATES }
    }
}

/// Entry point for flight searches. Holds no per-search state, so one
/// instance can serve concurrent requests.
pub struct FlightSearchEngine {
    direct: DirectSearch,
    creative: CreativeRouteAssembler,
}

impl FlightSearchEngine {
    pub fn new(fetcher: Arc<dyn OfferFetcher>, config: EngineConfig) -> Self {
        Self {
            direct: DirectSearch::new(fetcher.clone()),
            creative: CreativeRouteAssembler::new(fetcher, config.max_hub_candidates),
        }
    }

    /// Direct and connecting flights only, deduplicated and cheapest first.
    pub async fn search_all_apis(&self, params: &SearchParams) -> CoreResult<Vec<FlightRoute>> {
        params.validate()?;
        Ok(self.ranked_direct(params).await)
    }

    /// Direct and creative searches run side by side.
    pub async fn search_with_creative_routing(
        &self,
        params: &SearchParams,
    ) -> CoreResult<(Vec<FlightRoute>, Vec<CreativeRoutingOption>)> {
        params.validate()?;
        let (direct, creative) = tokio::join!(
            self.ranked_direct(params),
            self.creative.find_creative_routes(params),
        );
        Ok((direct, creative))
    }

    pub async fn compare_with_creative_routing(&self, params: &SearchParams) -> CoreResult<SearchComparison> {
        let (direct_flights, creative_routes) = self.search_with_creative_routing(params).await?;
        let savings = compare(&direct_flights, &creative_routes);

        if let Some(ref s) = savings {
            info!(
                "{} -> {}: creative routing saves {} ({:.1}%)",
                params.origin, params.destination, s.amount, s.percentage
            );
        }

        Ok(SearchComparison { direct_flights, creative_routes, savings })
    }

    async fn ranked_direct(&self, params: &SearchParams) -> Vec<FlightRoute> {
        let routes = self.direct.search(params).await;
        let fetched = routes.len();
        let ranked = dedupe_and_rank(routes);
        info!(
            "Direct search {} -> {}: {} offers, {} unique",
            params.origin,
            params.destination,
            fetched,
            ranked.len()
        );
        ranked
    }
}
