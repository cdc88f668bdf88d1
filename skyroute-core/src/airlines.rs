/// Airline with a direct-booking deep link template.
///
/// Templates use `{origin}`, `{destination}` and `{date}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Airline {
    pub code: &'static str,
    pub name: &'static str,
    pub booking_url_template: &'static str,
}

pub const AIRLINES: &[Airline] = &[
    Airline {
        code: "AA",
        name: "American Airlines",
        booking_url_template: "https://www.aa.com/booking/find-flights?locale=en_US&from={origin}&to={destination}&departDate={date}",
    },
    Airline {
        code: "UA",
        name: "United Airlines",
        booking_url_template: "https://www.united.com/en/us/fsr/choose-flights?f={origin}&t={destination}&d={date}&tt=1",
    },
    Airline {
        code: "DL",
        name: "Delta Air Lines",
        booking_url_template: "https://www.delta.com/flight-search/book-a-flight?from={origin}&to={destination}&departureDate={date}",
    },
    Airline {
        code: "BA",
        name: "British Airways",
        booking_url_template: "https://www.britishairways.com/travel/book/public/en_us?from={origin}&to={destination}&depDate={date}",
    },
    Airline {
        code: "AF",
        name: "Air France",
        booking_url_template: "https://wwws.airfrance.us/search/offers?origin={origin}&destination={destination}&outboundDate={date}",
    },
    Airline {
        code: "LH",
        name: "Lufthansa",
        booking_url_template: "https://www.lufthansa.com/us/en/flight-search?origin={origin}&destination={destination}&outboundDate={date}",
    },
    Airline {
        code: "KL",
        name: "KLM Royal Dutch Airlines",
        booking_url_template: "https://www.klm.com/search/offers?origin={origin}&destination={destination}&date={date}",
    },
    Airline {
        code: "EK",
        name: "Emirates",
        booking_url_template: "https://www.emirates.com/us/english/book/?from={origin}&to={destination}&departDate={date}",
    },
    Airline {
        code: "QR",
        name: "Qatar Airways",
        booking_url_template: "https://www.qatarairways.com/en-us/book.html?from={origin}&to={destination}&departing={date}",
    },
    Airline {
        code: "SQ",
        name: "Singapore Airlines",
        booking_url_template: "https://www.singaporeair.com/en_UK/us/plan-travel/book-flight/?origin={origin}&destination={destination}&departDate={date}",
    },
    Airline {
        code: "CX",
        name: "Cathay Pacific",
        booking_url_template: "https://www.cathaypacific.com/cx/en_US/book-a-trip/flight-search.html?origin={origin}&destination={destination}&departureDate={date}",
    },
    Airline {
        code: "KE",
        name: "Korean Air",
        booking_url_template: "https://www.koreanair.com/booking/search?origin={origin}&destination={destination}&departureDate={date}",
    },
    Airline {
        code: "NH",
        name: "All Nippon Airways",
        booking_url_template: "https://www.ana.co.jp/en/us/book-plan/search?origin={origin}&destination={destination}&date={date}",
    },
    Airline {
        code: "JL",
        name: "Japan Airlines",
        booking_url_template: "https://www.jal.co.jp/jp/en/inter/booking/?origin={origin}&destination={destination}&date={date}",
    },
    Airline {
        code: "MU",
        name: "China Eastern Airlines",
        booking_url_template: "https://us.ceair.com/en/booking?from={origin}&to={destination}&date={date}",
    },
    Airline {
        code: "QF",
        name: "Qantas",
        booking_url_template: "https://www.qantas.com/us/en/book-a-trip/flights.html?from={origin}&to={destination}&departureDate={date}",
    },
];

pub fn airline(code: &str) -> Option<&'static Airline> {
    AIRLINES.iter().find(|a| a.code == code)
}

pub fn airline_name(code: &str) -> String {
    airline(code)
        .map(|a| a.name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Deep link into the airline's own booking flow, or a metasearch fallback
/// for carriers we have no template for.
pub fn booking_url(airline_code: &str, origin: &str, destination: &str, date: &str) -> String {
    match airline(airline_code) {
        Some(a) => a
            .booking_url_template
            .replace("{origin}", origin)
            .replace("{destination}", destination)
            .replace("{date}", date),
        None => format!(
            "https://www.google.com/flights?hl=en#flt={}.{}.{}",
            origin, destination, date
        ),
    }
}
