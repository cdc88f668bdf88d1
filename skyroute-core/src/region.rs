use serde::{Deserialize, Serialize};

/// Coarse geographic bucket used only to narrow creative-routing hubs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Asia,
    Europe,
    MiddleEast,
    NorthAmerica,
    Pacific,
    Unknown,
}

const ASIA_AIRPORTS: &[&str] = &[
    "PVG", "PEK", "ICN", "HND", "NRT", "HKG", "SIN", "BKK", "TPE", "KUL", "MNL", "CGK", "DEL", "BOM",
];
const EUROPE_AIRPORTS: &[&str] = &[
    "LHR", "CDG", "AMS", "FRA", "MAD", "BCN", "FCO", "MUC", "IST", "ZRH", "VIE", "CPH", "ARN",
];
const MIDDLE_EAST_AIRPORTS: &[&str] = &["DXB", "DOH", "AUH", "CAI", "TLV", "AMM"];
const NORTH_AMERICA_AIRPORTS: &[&str] = &[
    "JFK", "LAX", "ORD", "DFW", "ATL", "SFO", "MIA", "SEA", "YVR", "YYZ", "MEX",
];
const PACIFIC_AIRPORTS: &[&str] = &["SYD", "MEL", "AKL", "BNE", "PER"];

const ASIA_HUBS: &[&str] = &["ICN", "HND", "NRT", "HKG", "SIN", "BKK", "TPE", "KUL"];
const EUROPE_HUBS: &[&str] = &["AMS", "CDG", "FRA", "LHR", "IST", "MAD", "BCN", "MUC", "ZRH"];
const MIDDLE_EAST_HUBS: &[&str] = &["DXB", "DOH", "AUH", "CAI"];
const NORTH_AMERICA_HUBS: &[&str] = &["JFK", "LAX", "ORD", "DFW", "ATL", "SFO", "SEA", "YVR"];
const PACIFIC_HUBS: &[&str] = &["SYD", "MEL", "AKL"];

impl Region {
    /// Regions with hub lists, in the priority order hubs are collected.
    pub const PRIORITY: [Region; 5] = [
        Region::Asia,
        Region::Europe,
        Region::MiddleEast,
        Region::NorthAmerica,
        Region::Pacific,
    ];

    /// Regions whose hubs are tried when neither endpoint is classified.
    pub const FALLBACK: [Region; 3] = [Region::Asia, Region::Europe, Region::MiddleEast];

    /// Classify an airport code. Anything outside the table is `Unknown`.
    pub fn of(airport_code: &str) -> Region {
        Self::PRIORITY
            .into_iter()
            .find(|region| region.airports().contains(&airport_code))
            .unwrap_or(Region::Unknown)
    }

    pub fn airports(&self) -> &'static [&'static str] {
        match self {
            Region::Asia => ASIA_AIRPORTS,
            Region::Europe => EUROPE_AIRPORTS,
            Region::MiddleEast => MIDDLE_EAST_AIRPORTS,
            Region::NorthAmerica => NORTH_AMERICA_AIRPORTS,
            Region::Pacific => PACIFIC_AIRPORTS,
            Region::Unknown => &[],
        }
    }

    pub fn hubs(&self) -> &'static [&'static str] {
        match self {
            Region::Asia => ASIA_HUBS,
            Region::Europe => EUROPE_HUBS,
            Region::MiddleEast => MIDDLE_EAST_HUBS,
            Region::NorthAmerica => NORTH_AMERICA_HUBS,
            Region::Pacific => PACIFIC_HUBS,
            Region::Unknown => &[],
        }
    }
}
