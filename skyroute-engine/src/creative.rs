use std::sync::Arc;

use futures_util::future::join_all;
use skyroute_core::{
    CreativeRoutingOption, FlightRoute, OfferFetcher, PriceBreakdown, RouteType, SearchParams,
};
use tracing::{debug, info};

use crate::direct::fetch_or_empty;
use crate::hubs::relevant_hubs;

/// Hubs probed per search unless configured otherwise.
pub const DEFAULT_MAX_HUB_CANDIDATES: usize = 5;

/// Split-ticket search: origin -> hub and hub -> destination booked as two
/// separate one-way tickets.
pub struct CreativeRouteAssembler {
    fetcher: Arc<dyn OfferFetcher>,
    max_hub_candidates: usize,
}

impl CreativeRouteAssembler {
    pub fn new(fetcher: Arc<dyn OfferFetcher>, max_hub_candidates: usize) -> Self {
        Self { fetcher, max_hub_candidates }
    }

    /// Probe the leading hub candidates and return every two-sided option,
    /// cheapest first.
    pub async fn find_creative_routes(&self, params: &SearchParams) -> Vec<CreativeRoutingOption> {
        let hubs: Vec<&str> = relevant_hubs(&params.origin, &params.destination)
            .into_iter()
            .take(self.max_hub_candidates)
            .collect();

        debug!(
            "Probing hubs {:?} for {} -> {}",
            hubs, params.origin, params.destination
        );

        let mut options: Vec<CreativeRoutingOption> =
            join_all(hubs.iter().map(|hub| self.probe_hub(params, hub)))
                .await
                .into_iter()
                .flatten()
                .collect();

        options.sort_by_key(|o| o.total_price);

        info!(
            "Creative routing {} -> {}: {} of {} hubs produced options",
            params.origin,
            params.destination,
            options.len(),
            hubs.len()
        );
        options
    }

    async fn probe_hub(&self, params: &SearchParams, hub: &str) -> Option<CreativeRoutingOption> {
        let first_leg = params.one_way_leg(&params.origin, hub).to_offer_query();
        let second_leg = params.one_way_leg(hub, &params.destination).to_offer_query();

        let fetcher = self.fetcher.as_ref();
        let (first_offers, second_offers) = tokio::join!(
            fetch_or_empty(fetcher, &first_leg),
            fetch_or_empty(fetcher, &second_leg),
        );

        match (cheapest(&first_offers), cheapest(&second_offers)) {
            (Some(first), Some(second)) => Some(combine_split_ticket(hub, first, second)),
            _ => {
                debug!(
                    "Dropping hub {}: {} offers to hub, {} from hub",
                    hub,
                    first_offers.len(),
                    second_offers.len()
                );
                None
            }
        }
    }
}

/// Lowest-priced route, first one on ties. Supplier ordering is not trusted.
pub fn cheapest(routes: &[FlightRoute]) -> Option<&FlightRoute> {
    routes.iter().min_by_key(|r| r.price_amount)
}

/// Join the two legs through `hub` into one synthetic itinerary.
///
/// The result is not bookable as a unit; its booking link points at the
/// first leg and the description tells the traveler to buy both tickets.
pub fn combine_split_ticket(hub: &str, first: &FlightRoute, second: &FlightRoute) -> CreativeRoutingOption {
    let total_price = first.price_amount + second.price_amount;

    let mut segments = first.segments.clone();
    segments.extend(second.segments.iter().cloned());

    let combined = FlightRoute {
        id: format!("creative-{}-{}", first.id, second.id),
        segments,
        total_duration_minutes: first.total_duration_minutes + second.total_duration_minutes,
        // One extra stop for the hub itself, on top of each leg's own stops.
        layovers: first.layovers + second.layovers + 1,
        price_amount: total_price,
        currency: first.currency.clone(),
        booking_url: first.booking_url.clone(),
        route_type: RouteType::MultiCity,
        is_creative_routing: true,
        price_breakdown: Some(PriceBreakdown {
            segment_prices: vec![first.price_amount, second.price_amount],
            total_price,
        }),
    };

    CreativeRoutingOption {
        hub: hub.to_string(),
        currency: combined.currency.clone(),
        routes: vec![combined],
        total_price,
        description: format!("Book separate tickets via {}", hub),
    }
}
