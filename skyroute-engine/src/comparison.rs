use skyroute_core::{CreativeRoutingOption, FlightRoute, Savings};

/// Savings of the cheapest creative option over the cheapest direct route.
///
/// Both slices must already be sorted ascending. Returns `None` unless the
/// creative option is strictly cheaper.
pub fn compare(direct_flights: &[FlightRoute], creative_options: &[CreativeRoutingOption]) -> Option<Savings> {
    let cheapest_direct = direct_flights.first()?;
    let cheapest_creative = creative_options.first()?;

    if cheapest_creative.total_price >= cheapest_direct.price_amount {
        return None;
    }

    let amount = cheapest_direct.price_amount - cheapest_creative.total_price;
    let percentage = amount as f64 / cheapest_direct.price_amount as f64 * 100.0;

    Some(Savings {
        amount,
        percentage,
        description: format!("Save {:.0}%: {}", percentage, cheapest_creative.description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creative::combine_split_ticket;
    use crate::testing::route;

    fn creative(price_first: i64, price_second: i64) -> CreativeRoutingOption {
        combine_split_ticket(
            "ICN",
            &route("l1", &[("PVG", "ICN", "2025-03-14T08:00:00")], price_first),
            &route("l2", &[("ICN", "HND", "2025-03-14T15:00:00")], price_second),
        )
    }

    #[test]
    fn test_savings_when_creative_is_cheaper() {
        let direct = vec![route("d", &[("PVG", "HND", "2025-03-14T09:00:00")], 50000)];
        let savings = compare(&direct, &[creative(20000, 15000)]).expect("expected savings");

        assert_eq!(savings.amount, 15000);
        assert!((savings.percentage - 30.0).abs() < 1e-9);
        assert_eq!(savings.description, "Save 30%: Book separate tickets via ICN");
    }

    #[test]
    fn test_no_savings_when_equal_or_more_expensive() {
        let direct = vec![route("d", &[("PVG", "HND", "2025-03-14T09:00:00")], 35000)];
        assert!(compare(&direct, &[creative(20000, 15000)]).is_none());
        assert!(compare(&direct, &[creative(30000, 15000)]).is_none());
    }

    #[test]
    fn test_no_savings_when_either_side_empty() {
        let direct = vec![route("d", &[("PVG", "HND", "2025-03-14T09:00:00")], 50000)];
        assert!(compare(&direct, &[]).is_none());
        assert!(compare(&[], &[creative(100, 100)]).is_none());
    }
}
