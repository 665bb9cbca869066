//! Transcript grammar.
//!
//! Turns one raw input line into a [`Request`]. The grammar is positional
//! and strict: tokens are separated by single spaces with no surrounding
//! whitespace, and all lexical and per-line validation happens here, so
//! the store and planner can assume well-formed facts. Only the cross-line
//! checks (duplicate line numbers, duplicate ticket names) are left to the
//! store.
//!
//! Line shapes:
//!
//! ```text
//! LINE TIME STOP TIME STOP [TIME STOP ...]     route fact
//! NAME PRICE MINUTES                           ticket fact (NAME may contain spaces)
//! ? STOP LINE STOP [LINE STOP ...]             itinerary query
//! ```
//!
//! A blank line is ignored; anything else is invalid.

use crate::dispatch::Request;
use crate::domain::{LineId, Price, Query, Route, Stop, StopTime, Ticket};

/// Parse one transcript line.
///
/// Never fails: a line that does not match the grammar, or that fails
/// domain validation, becomes [`Request::Invalid`] for the dispatcher to
/// report.
///
/// # Examples
///
/// ```
/// use tram_fares::dispatch::Request;
/// use tram_fares::input::parse_line;
///
/// assert!(matches!(parse_line("10 6:05 Center 6:15 Market"), Request::AddRoute { .. }));
/// assert!(matches!(parse_line("day pass 10.20 720"), Request::AddTicket(_)));
/// assert!(matches!(parse_line("? Center 10 Market"), Request::Query(_)));
/// assert!(matches!(parse_line(""), Request::Ignore));
/// assert!(matches!(parse_line("no such shape 1 2 3"), Request::Invalid));
/// ```
pub fn parse_line(line: &str) -> Request {
    if line.is_empty() {
        return Request::Ignore;
    }

    let tokens: Vec<&str> = line.split(' ').collect();

    // Doubled, leading or trailing spaces all produce an empty token
    if tokens.iter().any(|t| t.is_empty()) {
        return Request::Invalid;
    }

    let first = tokens[0];
    if first == "?" {
        parse_query(&tokens[1..])
    } else if first.bytes().all(|b| b.is_ascii_digit()) {
        parse_route(&tokens)
    } else {
        parse_ticket(&tokens)
    }
}

/// `LINE TIME STOP TIME STOP ...` — line number, then at least two
/// time/stop pairs.
fn parse_route(tokens: &[&str]) -> Request {
    let pairs = &tokens[1..];
    if pairs.len() < 4 || pairs.len() % 2 != 0 {
        return Request::Invalid;
    }

    let Ok(line) = LineId::parse(tokens[0]) else {
        return Request::Invalid;
    };

    let mut stops = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks(2) {
        let Ok(departure) = StopTime::parse(pair[0]) else {
            return Request::Invalid;
        };
        let Ok(stop) = Stop::new(pair[1], departure) else {
            return Request::Invalid;
        };
        stops.push(stop);
    }

    match Route::new(stops) {
        Ok(route) => Request::AddRoute { line, route },
        Err(_) => Request::Invalid,
    }
}

/// `NAME PRICE MINUTES` — the name is every token before the last two.
fn parse_ticket(tokens: &[&str]) -> Request {
    if tokens.len() < 3 {
        return Request::Invalid;
    }

    let (name_words, rest) = tokens.split_at(tokens.len() - 2);
    let Ok(price) = Price::parse(rest[0]) else {
        return Request::Invalid;
    };
    let Some(validity) = parse_minutes(rest[1]) else {
        return Request::Invalid;
    };

    match Ticket::new(name_words.join(" "), price, validity) {
        Ok(ticket) => Request::AddTicket(ticket),
        Err(_) => Request::Invalid,
    }
}

/// `? STOP LINE STOP ...` — stops and line numbers alternate, ending on a
/// stop. The final stop gets the terminus sentinel.
fn parse_query(tokens: &[&str]) -> Request {
    if tokens.len() < 3 || tokens.len() % 2 == 0 {
        return Request::Invalid;
    }

    let mut waypoints = Vec::with_capacity(tokens.len() / 2 + 1);
    for chunk in tokens.chunks(2) {
        let line = match chunk {
            [_, line_token] => {
                let Ok(line) = LineId::parse(line_token) else {
                    return Request::Invalid;
                };
                line
            }
            _ => LineId::TERMINUS,
        };
        waypoints.push((chunk[0].to_string(), line));
    }

    match Query::new(waypoints) {
        Ok(query) => Request::Query(query),
        Err(_) => Request::Invalid,
    }
}

/// A positive minute count in decimal digits.
fn parse_minutes(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut value: u64 = 0;
    for &b in s.as_bytes() {
        value = value.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }
    if value == 0 { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Price;

    #[test]
    fn blank_line_ignored() {
        assert_eq!(parse_line(""), Request::Ignore);
    }

    #[test]
    fn whitespace_only_is_invalid() {
        assert_eq!(parse_line(" "), Request::Invalid);
        assert_eq!(parse_line("  "), Request::Invalid);
    }

    #[test]
    fn route_line() {
        let request = parse_line("10 6:05 Center 6:15 Market 6:30 Harbor");
        let Request::AddRoute { line, route } = request else {
            panic!("expected AddRoute, got {request:?}");
        };
        assert_eq!(line, LineId::new(10));
        assert_eq!(route.len(), 3);
        assert_eq!(
            route.departure_at("Market"),
            Some(StopTime::parse("6:15").unwrap())
        );
    }

    #[test]
    fn route_rejects_bad_shapes() {
        // No stops, one stop, dangling time
        assert_eq!(parse_line("10"), Request::Invalid);
        assert_eq!(parse_line("10 6:05 Center"), Request::Invalid);
        assert_eq!(parse_line("10 6:05 Center 6:15"), Request::Invalid);
    }

    #[test]
    fn route_rejects_out_of_service_time() {
        // 5:00 is before the first tram of the day
        assert_eq!(parse_line("4 5:00 A 5:10 B"), Request::Invalid);
        assert_eq!(parse_line("4 21:30 A 21:40 B"), Request::Invalid);
    }

    #[test]
    fn route_rejects_non_increasing_times() {
        assert_eq!(parse_line("4 6:10 A 6:05 B"), Request::Invalid);
        assert_eq!(parse_line("4 6:10 A 6:10 B"), Request::Invalid);
    }

    #[test]
    fn route_rejects_repeated_stop() {
        assert_eq!(parse_line("4 6:00 A 6:10 B 6:20 A"), Request::Invalid);
    }

    #[test]
    fn route_rejects_bad_stop_names() {
        assert_eq!(parse_line("4 6:00 A1 6:10 B"), Request::Invalid);
        assert_eq!(parse_line("4 6:00 A-B 6:10 C"), Request::Invalid);
    }

    #[test]
    fn route_accepts_full_name_charset() {
        let request = parse_line("4 6:00 Main_St 6:10 Upper^Hill");
        assert!(matches!(request, Request::AddRoute { .. }));
    }

    #[test]
    fn ticket_line() {
        let request = parse_line("single 2.40 15");
        let Request::AddTicket(ticket) = request else {
            panic!("expected AddTicket, got {request:?}");
        };
        assert_eq!(ticket.name(), "single");
        assert_eq!(ticket.price(), Price::from_cents(240));
        assert_eq!(ticket.validity_minutes(), 15);
    }

    #[test]
    fn ticket_name_may_contain_spaces() {
        let request = parse_line("weekly off peak pass 25.00 10080");
        let Request::AddTicket(ticket) = request else {
            panic!("expected AddTicket, got {request:?}");
        };
        assert_eq!(ticket.name(), "weekly off peak pass");
    }

    #[test]
    fn ticket_rejects_bad_fields() {
        // Price format
        assert_eq!(parse_line("single 2.4 15"), Request::Invalid);
        assert_eq!(parse_line("single 2 15"), Request::Invalid);
        // Zero price
        assert_eq!(parse_line("single 0.00 15"), Request::Invalid);
        // Validity
        assert_eq!(parse_line("single 2.40 0"), Request::Invalid);
        assert_eq!(parse_line("single 2.40 -5"), Request::Invalid);
        assert_eq!(parse_line("single 2.40 abc"), Request::Invalid);
        // Name charset
        assert_eq!(parse_line("single2 2.40 15"), Request::Invalid);
        // Too few tokens
        assert_eq!(parse_line("single 2.40"), Request::Invalid);
    }

    #[test]
    fn query_line() {
        let request = parse_line("? Center 10 Market 7 Harbor");
        let Request::Query(query) = request else {
            panic!("expected Query, got {request:?}");
        };

        let legs: Vec<_> = query.legs().collect();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, "Center");
        assert_eq!(legs[0].line, LineId::new(10));
        assert_eq!(legs[1].from, "Market");
        assert_eq!(legs[1].line, LineId::new(7));
        assert_eq!(legs[1].to, "Harbor");

        // The final waypoint carries the terminus sentinel
        assert_eq!(query.waypoints().last().unwrap().line(), LineId::TERMINUS);
    }

    #[test]
    fn query_rejects_bad_shapes() {
        // Lone question mark, single stop, dangling line number
        assert_eq!(parse_line("?"), Request::Invalid);
        assert_eq!(parse_line("? Center"), Request::Invalid);
        assert_eq!(parse_line("? Center 10"), Request::Invalid);
        assert_eq!(parse_line("? Center 10 Market 7"), Request::Invalid);
    }

    #[test]
    fn query_rejects_bad_tokens() {
        assert_eq!(parse_line("? Center ten Market"), Request::Invalid);
        assert_eq!(parse_line("? Cen!ter 10 Market"), Request::Invalid);
    }

    #[test]
    fn spacing_is_strict() {
        assert_eq!(parse_line(" 10 6:05 Center 6:15 Market"), Request::Invalid);
        assert_eq!(parse_line("10 6:05 Center 6:15 Market "), Request::Invalid);
        assert_eq!(parse_line("10 6:05  Center 6:15 Market"), Request::Invalid);
        assert_eq!(parse_line("single  2.40 15"), Request::Invalid);
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(parse_line("!"), Request::Invalid);
        assert_eq!(parse_line("hello"), Request::Invalid);
        assert_eq!(parse_line("10 stops nowhere"), Request::Invalid);
        assert_eq!(parse_line("?Center 10 Market"), Request::Invalid);
    }
}
