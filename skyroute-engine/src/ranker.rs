use std::collections::HashMap;

use skyroute_core::FlightRoute;

/// Collapse routes flying the same physical segments to the cheapest copy,
/// then order by price.
///
/// A cheaper duplicate takes over the slot of the first copy seen, and the
/// final sort is stable, so equal prices keep collection order.
pub fn dedupe_and_rank(routes: Vec<FlightRoute>) -> Vec<FlightRoute> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(routes.len());
    let mut unique: Vec<FlightRoute> = Vec::with_capacity(routes.len());

    for route in routes {
        let key = route.identity_key();
        match slots.get(&key) {
            Some(&idx) => {
                if route.price_amount < unique[idx].price_amount {
                    unique[idx] = route;
                }
            }
            None => {
                slots.insert(key, unique.len());
                unique.push(route);
            }
        }
    }

    unique.sort_by_key(|r| r.price_amount);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::route;

    #[test]
    fn test_duplicate_keeps_cheaper_instance() {
        let legs = [("PVG", "HND", "2025-03-14T09:00:00")];
        let routes = vec![route("a", &legs, 30000), route("b", &legs, 28000)];

        let ranked = dedupe_and_rank(routes);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "b");
        assert_eq!(ranked[0].price_amount, 28000);
    }

    #[test]
    fn test_equal_price_duplicate_keeps_first() {
        let legs = [("PVG", "HND", "2025-03-14T09:00:00")];
        let ranked = dedupe_and_rank(vec![route("a", &legs, 30000), route("b", &legs, 30000)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "a");
    }

    #[test]
    fn test_different_departure_times_are_distinct() {
        let routes = vec![
            route("a", &[("PVG", "HND", "2025-03-14T09:00:00")], 30000),
            route("b", &[("PVG", "HND", "2025-03-14T09:00:00+08:00")], 30000),
        ];
        assert_eq!(dedupe_and_rank(routes).len(), 2);
    }

    #[test]
    fn test_sorted_ascending_and_stable() {
        let routes = vec![
            route("a", &[("PVG", "HND", "2025-03-14T07:00:00")], 50000),
            route("b", &[("PVG", "HND", "2025-03-14T08:00:00")], 20000),
            route("c", &[("PVG", "HND", "2025-03-14T09:00:00")], 50000),
            route("d", &[("PVG", "NRT", "2025-03-14T09:00:00"), ("NRT", "HND", "2025-03-14T15:00:00")], 20000),
        ];

        let ranked = dedupe_and_rank(routes);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
        assert!(ranked.windows(2).all(|w| w[0].price_amount <= w[1].price_amount));
    }

    #[test]
    fn test_replacement_takes_first_slot() {
        let dup = [("PVG", "HND", "2025-03-14T07:00:00")];
        let routes = vec![
            route("first", &dup, 40000),
            route("other", &[("PVG", "HND", "2025-03-14T10:00:00")], 35000),
            route("cheaper-dup", &dup, 35000),
        ];

        // "cheaper-dup" inherits the slot of "first", ahead of "other".
        let ranked = dedupe_and_rank(routes);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cheaper-dup", "other"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe_and_rank(Vec::new()).is_empty());
    }
}
