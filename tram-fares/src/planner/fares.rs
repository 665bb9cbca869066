//! Minimum-cost ticket selection.
//!
//! Searches the price-ascending catalog for the cheapest multiset of at
//! most three tickets whose summed validity covers a required duration.
//! The search enumerates index combinations `a <= b <= c`, so every
//! multiset is visited exactly once, and prunes on the price ordering:
//! once a combination at some level covers the duration, no later ticket
//! at that level can improve on it.

use tracing::{debug, trace};

use crate::domain::Price;
use crate::store::{FareOffer, TicketCatalog};

/// A passenger carries at most this many tickets for one journey.
pub const MAX_TICKETS_PER_JOURNEY: usize = 3;

/// The winning ticket combination for a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareSelection {
    names: Vec<String>,
    total_price: Price,
}

impl FareSelection {
    /// Returns the ticket names in discovery order (cheapest-index first;
    /// a repeated ticket appears once per purchase).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Consumes the selection, returning the ticket names.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    /// Returns the combined price of the selection.
    pub fn total_price(&self) -> Price {
        self.total_price
    }
}

/// Candidate tracked during the search: picked catalog indices and price.
struct Candidate {
    picks: Vec<usize>,
    price: Price,
}

/// Find the cheapest combination of at most three tickets covering
/// `required_minutes`.
///
/// A ticket whose validity exactly equals the required duration covers it.
/// Returns `None` when no combination of up to
/// [`MAX_TICKETS_PER_JOURNEY`] tickets covers the duration — in
/// particular, always, when the catalog is empty.
///
/// Equal-price ties resolve by enumeration order: the first combination
/// found at a price wins, except that a covering single ticket found later
/// displaces an equal-priced combination, since the search stops at the
/// first covering single anyway.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::{Price, Ticket};
/// use tram_fares::planner::cheapest_cover;
/// use tram_fares::store::TicketCatalog;
///
/// let mut catalog = TicketCatalog::new();
/// catalog
///     .add(Ticket::new("short", Price::from_cents(1000), 10).unwrap())
///     .unwrap();
/// catalog
///     .add(Ticket::new("long", Price::from_cents(3000), 30).unwrap())
///     .unwrap();
///
/// // Two shorts beat one long for a 20-minute journey
/// let selection = cheapest_cover(&catalog, 20).unwrap();
/// assert_eq!(selection.names(), ["short", "short"]);
/// assert_eq!(selection.total_price(), Price::from_cents(2000));
/// ```
pub fn cheapest_cover(catalog: &TicketCatalog, required_minutes: u64) -> Option<FareSelection> {
    let offers: Vec<FareOffer<'_>> = catalog.offers().collect();
    let mut best: Option<Candidate> = None;

    'outer: for a in 0..offers.len() {
        let price_a = offers[a].price;
        let time_a = offers[a].validity_minutes;

        if time_a >= required_minutes {
            // A single ticket covers the journey. Everything from this
            // index on is at least this expensive, so the search ends here.
            if best.as_ref().is_none_or(|b| price_a <= b.price) {
                trace!(name = offers[a].name, price = %price_a, "single ticket covers");
                best = Some(Candidate {
                    picks: vec![a],
                    price: price_a,
                });
            }
            break 'outer;
        }

        for b in a..offers.len() {
            let price_ab = price_a.saturating_add(offers[b].price);
            let time_ab = time_a.saturating_add(offers[b].validity_minutes);

            if time_ab >= required_minutes {
                // Later b's only cost more; no point continuing this pass
                if best.as_ref().is_none_or(|best| price_ab < best.price) {
                    trace!(
                        first = offers[a].name,
                        second = offers[b].name,
                        price = %price_ab,
                        "pair covers"
                    );
                    best = Some(Candidate {
                        picks: vec![a, b],
                        price: price_ab,
                    });
                }
                break;
            }

            for c in b..offers.len() {
                let price_abc = price_ab.saturating_add(offers[c].price);
                let time_abc = time_ab.saturating_add(offers[c].validity_minutes);

                if time_abc >= required_minutes {
                    if best.as_ref().is_none_or(|best| price_abc < best.price) {
                        trace!(
                            first = offers[a].name,
                            second = offers[b].name,
                            third = offers[c].name,
                            price = %price_abc,
                            "triple covers"
                        );
                        best = Some(Candidate {
                            picks: vec![a, b, c],
                            price: price_abc,
                        });
                    }
                    break;
                }
            }
        }
    }

    let selection = best.map(|candidate| FareSelection {
        names: candidate
            .picks
            .iter()
            .map(|&i| offers[i].name.to_string())
            .collect(),
        total_price: candidate.price,
    });

    match &selection {
        Some(s) => debug!(
            required_minutes,
            tickets = s.names.len(),
            total = %s.total_price,
            "fare selected"
        ),
        None => debug!(required_minutes, "no covering ticket set"),
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ticket;

    fn catalog(tickets: &[(&str, u64, u64)]) -> TicketCatalog {
        let mut catalog = TicketCatalog::new();
        for (name, cents, validity) in tickets {
            catalog
                .add(Ticket::new(*name, Price::from_cents(*cents), *validity).unwrap())
                .unwrap();
        }
        catalog
    }

    #[test]
    fn empty_catalog_covers_nothing() {
        assert_eq!(cheapest_cover(&TicketCatalog::new(), 10), None);
    }

    #[test]
    fn cheapest_covering_single_wins() {
        let catalog = catalog(&[
            ("shorter", 1000, 10),
            ("middle", 3000, 30),
            ("longest", 6000, 60),
        ]);

        // 25 minutes: three shorters cover at 30.00 first, then the
        // equal-priced middle single displaces them and ends the search
        let selection = cheapest_cover(&catalog, 25).unwrap();
        assert_eq!(selection.names(), ["middle"]);
        assert_eq!(selection.total_price(), Price::from_cents(3000));
    }

    #[test]
    fn repeated_cheap_pair_beats_covering_single() {
        // Prices 10 < 30 < 60, validities 10, 30, 60; 20 minutes needed.
        // The pair pass finds shorter+shorter (price 20.00) before the
        // outer pass ever reaches the covering 30.00 single.
        let catalog = catalog(&[
            ("shorter", 1000, 10),
            ("middle", 3000, 30),
            ("longest", 6000, 60),
        ]);

        let selection = cheapest_cover(&catalog, 20).unwrap();
        assert_eq!(selection.names(), ["shorter", "shorter"]);
        assert_eq!(selection.total_price(), Price::from_cents(2000));
    }

    #[test]
    fn covering_single_displaces_equal_priced_pair() {
        let catalog = catalog(&[("half", 100, 10), ("full", 200, 20)]);

        // half+half and full both cost 2.00; the search ends on the
        // covering single, which takes the tie
        let selection = cheapest_cover(&catalog, 20).unwrap();
        assert_eq!(selection.names(), ["full"]);
        assert_eq!(selection.total_price(), Price::from_cents(200));
    }

    #[test]
    fn exact_validity_covers() {
        let catalog = catalog(&[("exact", 500, 48)]);

        let selection = cheapest_cover(&catalog, 48).unwrap();
        assert_eq!(selection.names(), ["exact"]);

        // One minute more is out of reach for a single; two exacts
        // cover it
        let selection = cheapest_cover(&catalog, 49).unwrap();
        assert_eq!(selection.names(), ["exact", "exact"]);
    }

    #[test]
    fn triple_needed() {
        let catalog = catalog(&[("unit", 100, 10)]);

        let selection = cheapest_cover(&catalog, 30).unwrap();
        assert_eq!(selection.names(), ["unit", "unit", "unit"]);
        assert_eq!(selection.total_price(), Price::from_cents(300));

        // Four would be needed: no cover
        assert_eq!(cheapest_cover(&catalog, 31), None);
    }

    #[test]
    fn mixed_triple_beats_expensive_single() {
        let catalog = catalog(&[
            ("ten", 100, 10),
            ("twenty", 150, 20),
            ("day", 1000, 100),
        ]);

        // 50 minutes: ten+twenty+twenty = 4.00 covers; day alone is 10.00
        let selection = cheapest_cover(&catalog, 50).unwrap();
        assert_eq!(selection.names(), ["ten", "twenty", "twenty"]);
        assert_eq!(selection.total_price(), Price::from_cents(400));
    }

    #[test]
    fn zero_minutes_takes_the_cheapest_ticket() {
        let catalog = catalog(&[("cheap", 100, 10), ("rich", 900, 90)]);

        let selection = cheapest_cover(&catalog, 0).unwrap();
        assert_eq!(selection.names(), ["cheap"]);
    }

    #[test]
    fn price_tie_broken_by_name_order() {
        // Same price: the catalog index orders banana before cherry, so
        // the search meets banana first and keeps it
        let catalog = catalog(&[("cherry", 500, 60), ("banana", 500, 60)]);

        let selection = cheapest_cover(&catalog, 60).unwrap();
        assert_eq!(selection.names(), ["banana"]);
    }

    #[test]
    fn result_covers_and_respects_size_bound() {
        let catalog = catalog(&[
            ("a", 120, 15),
            ("bb", 340, 35),
            ("ccc", 560, 55),
            ("dddd", 780, 75),
        ]);

        for required in [0u64, 1, 15, 16, 50, 100, 150, 225, 226] {
            match cheapest_cover(&catalog, required) {
                Some(selection) => {
                    assert!(selection.names().len() <= MAX_TICKETS_PER_JOURNEY);
                    let covered: u64 = selection
                        .names()
                        .iter()
                        .map(|name| {
                            catalog
                                .offers()
                                .find(|o| o.name == name)
                                .unwrap()
                                .validity_minutes
                        })
                        .sum();
                    assert!(covered >= required, "required {required}, covered {covered}");
                }
                None => assert!(required > 225, "no cover found for {required}"),
            }
        }
    }
}
