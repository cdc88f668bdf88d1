use skyroute_core::Region;

/// Candidate hubs for splitting a trip, most plausible first.
///
/// Every region touched by either endpoint contributes its whole hub list,
/// in [`Region::PRIORITY`] order. When neither endpoint is classified the
/// Asia, Europe and Middle East lists are used. Duplicates keep their first
/// position.
pub fn relevant_hubs(origin: &str, destination: &str) -> Vec<&'static str> {
    let origin_region = Region::of(origin);
    let destination_region = Region::of(destination);

    let mut regions: Vec<Region> = Region::PRIORITY
        .into_iter()
        .filter(|r| *r == origin_region || *r == destination_region)
        .collect();

    if regions.is_empty() {
        regions = Region::FALLBACK.to_vec();
    }

    let mut hubs: Vec<&'static str> = Vec::new();
    for hub in regions.iter().flat_map(|r| r.hubs().iter().copied()) {
        if !hubs.contains(&hub) {
            hubs.push(hub);
        }
    }
    hubs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_region_returns_that_region_hubs() {
        let hubs = relevant_hubs("PVG", "HND");
        assert_eq!(
            hubs,
            vec!["ICN", "HND", "NRT", "HKG", "SIN", "BKK", "TPE", "KUL"]
        );
    }

    #[test]
    fn test_regions_are_collected_in_priority_order() {
        // Destination region (Asia) still comes before origin region (Europe).
        let hubs = relevant_hubs("LHR", "SIN");
        assert_eq!(hubs.len(), 8 + 9);
        assert_eq!(&hubs[..2], &["ICN", "HND"]);
        assert_eq!(hubs[8], "AMS");
    }

    #[test]
    fn test_unclassified_endpoints_fall_back() {
        let hubs = relevant_hubs("XXX", "YYY");
        assert_eq!(hubs.len(), 8 + 9 + 4);
        assert_eq!(hubs.first(), Some(&"ICN"));
        assert_eq!(hubs.last(), Some(&"CAI"));
    }

    #[test]
    fn test_one_unknown_endpoint_uses_known_region_only() {
        let hubs = relevant_hubs("NYC", "SYD");
        assert_eq!(hubs, vec!["SYD", "MEL", "AKL"]);
    }

    #[test]
    fn test_output_has_no_duplicates_and_stays_within_tables() {
        let all: HashSet<&str> = Region::PRIORITY
            .iter()
            .flat_map(|r| r.hubs().iter().copied())
            .collect();

        for (o, d) in [("PVG", "JFK"), ("DXB", "AKL"), ("CDG", "LAX"), ("ABC", "DEF")] {
            let hubs = relevant_hubs(o, d);
            let unique: HashSet<&str> = hubs.iter().copied().collect();
            assert_eq!(unique.len(), hubs.len());
            assert!(unique.is_subset(&all));
        }
    }
}
