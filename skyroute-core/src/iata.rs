// ============================================================================
// Metropolitan city codes
// ============================================================================

/// City codes that aggregate several airports, in the order they are searched.
///
/// Some entries reuse the code of their main airport (`LAX`, `SFO`, `BKK`,
/// `SHA`), so searching one of those codes fans out to the whole area.
pub const CITY_CODES: &[(&str, &[&str])] = &[
    ("TYO", &["HND", "NRT"]),
    ("NYC", &["JFK", "LGA", "EWR"]),
    ("LON", &["LHR", "LGW", "LCY", "STN", "LTN"]),
    ("PAR", &["CDG", "ORY"]),
    ("SHA", &["PVG", "SHA"]),
    ("LAX", &["LAX", "BUR", "ONT", "SNA", "LGB"]),
    ("CHI", &["ORD", "MDW"]),
    ("WAS", &["IAD", "DCA", "BWI"]),
    ("SFO", &["SFO", "OAK", "SJC"]),
    ("MIL", &["MXP", "LIN", "BGY"]),
    ("MOW", &["SVO", "DME", "VKO"]),
    ("BKK", &["BKK", "DMK"]),
    ("SEL", &["ICN", "GMP"]),
];

fn city_airports(code: &str) -> Option<&'static [&'static str]> {
    CITY_CODES
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(code))
        .map(|(_, airports)| *airports)
}

pub fn is_city_code(code: &str) -> bool {
    city_airports(code).is_some()
}

/// Airports to search for `code`. A plain airport code maps to itself.
pub fn expand_city_code(code: &str) -> Vec<String> {
    match city_airports(code) {
        Some(airports) => airports.iter().map(|a| a.to_string()).collect(),
        None => vec![code.to_string()],
    }
}
