//! Booking aggregation: priced line items and the checkout gate
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{CHILD_PRICE_CENTS, YOUTH_PRICE_PCT};
use crate::numbers::{format_cents, line_total_cents, percent_of_cents};
use crate::tickets::{TicketCounts, TicketKind};

/// Per-ticket-type pricing derived from the date's adult price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSchedule {
    pub adult_cents: i64,
    pub youth_cents: i64,
    pub child_cents: i64,
}

impl PriceSchedule {
    #[must_use]
    pub fn from_base(base_price_cents: i64) -> Self {
        Self::with_youth_pct(base_price_cents, YOUTH_PRICE_PCT)
    }

    #[must_use]
    pub fn with_youth_pct(base_price_cents: i64, youth_pct: u32) -> Self {
        Self {
            adult_cents: base_price_cents,
            youth_cents: percent_of_cents(base_price_cents, youth_pct),
            child_cents: CHILD_PRICE_CENTS,
        }
    }

    #[must_use]
    pub const fn unit_cents(&self, kind: TicketKind) -> i64 {
        match kind {
            TicketKind::Adult => self.adult_cents,
            TicketKind::Youth => self.youth_cents,
            TicketKind::Child => self.child_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: TicketKind,
    pub quantity: u32,
    pub unit_cents: i64,
    pub total_cents: i64,
}

impl LineItem {
    /// "2 Adults × $40.00", "1 Child × Free"
    #[must_use]
    pub fn description(&self) -> String {
        let unit = if self.unit_cents == 0 {
            "Free".to_string()
        } else {
            format_cents(self.unit_cents)
        };
        format!("{} {} × {unit}", self.quantity, self.kind.noun(self.quantity))
    }
}

/// Priced view of the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    /// One entry per ticket kind, in adult/youth/child order
    pub lines: SmallVec<[LineItem; 3]>,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    pub guests: u32,
    pub complete: bool,
}

impl BookingSummary {
    /// Price a selection. No taxes or fees are modeled, so the total equals
    /// the subtotal.
    #[must_use]
    pub fn compute(
        date: Option<NaiveDate>,
        time: Option<&str>,
        tickets: TicketCounts,
        prices: PriceSchedule,
    ) -> Self {
        let lines: SmallVec<[LineItem; 3]> = TicketKind::ALL
            .into_iter()
            .map(|kind| {
                let quantity = tickets.count(kind);
                let unit_cents = prices.unit_cents(kind);
                LineItem {
                    kind,
                    quantity,
                    unit_cents,
                    total_cents: line_total_cents(unit_cents, quantity),
                }
            })
            .collect();
        let subtotal_cents = lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.total_cents));
        let guests = tickets.total();
        Self {
            date,
            time: time.map(str::to_string),
            lines,
            subtotal_cents,
            total_cents: subtotal_cents,
            guests,
            complete: is_complete(date, time, tickets),
        }
    }

    #[must_use]
    pub fn line(&self, kind: TicketKind) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.kind == kind)
    }

    /// Lines shown in the summary card.
    pub fn visible_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(|line| line.quantity > 0)
    }

    /// "1 guest", "3 guests"; `None` when no tickets are chosen.
    #[must_use]
    pub fn guest_label(&self) -> Option<String> {
        match self.guests {
            0 => None,
            1 => Some("1 guest".to_string()),
            n => Some(format!("{n} guests")),
        }
    }

    #[must_use]
    pub const fn checkout_label(&self) -> &'static str {
        if self.complete {
            "Checkout"
        } else {
            "Complete Booking Details"
        }
    }

    #[must_use]
    pub fn total_label(&self) -> String {
        format_cents(self.total_cents)
    }
}

/// Checkout gate: date, time, and at least one ticket.
#[must_use]
pub const fn is_complete(date: Option<NaiveDate>, time: Option<&str>, tickets: TicketCounts) -> bool {
    date.is_some() && time.is_some() && tickets.total() > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, day)
    }

    #[test]
    fn forty_dollar_example_totals_104() {
        let summary = BookingSummary::compute(
            june(18),
            Some("9:00"),
            TicketCounts::new(2, 1, 1),
            PriceSchedule::from_base(4000),
        );
        assert_eq!(summary.subtotal_cents, 10_400);
        assert_eq!(summary.total_cents, 10_400);
        assert_eq!(summary.total_label(), "$104.00");
        assert_eq!(summary.guests, 4);
        assert!(summary.complete);
        let descriptions: Vec<String> = summary.visible_lines().map(LineItem::description).collect();
        assert_eq!(
            descriptions,
            vec!["2 Adults × $40.00", "1 Youth × $24.00", "1 Child × Free"]
        );
    }

    #[test]
    fn total_formula_holds_across_counts_and_prices() {
        for base in [0_i64, 500, 2500, 4000, 4500, 5000, 6500] {
            let prices = PriceSchedule::from_base(base);
            for adults in 0..4 {
                for youth in 0..4 {
                    for children in 0..4 {
                        let summary = BookingSummary::compute(
                            None,
                            None,
                            TicketCounts::new(adults, youth, children),
                            prices,
                        );
                        let expected = i64::from(adults) * base + i64::from(youth) * base * 6 / 10;
                        assert_eq!(summary.total_cents, expected);
                        assert_eq!(summary.line(TicketKind::Child).unwrap().total_cents, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn completeness_requires_date_time_and_guests() {
        let some = TicketCounts::new(0, 0, 1);
        let none = TicketCounts::empty();
        for date in [None, june(20)] {
            for time in [None, Some("11:30")] {
                for tickets in [some, none] {
                    let expected = date.is_some() && time.is_some() && tickets.total() > 0;
                    assert_eq!(is_complete(date, time, tickets), expected);
                    let summary =
                        BookingSummary::compute(date, time, tickets, PriceSchedule::from_base(4000));
                    assert_eq!(summary.complete, expected);
                    assert_eq!(
                        summary.checkout_label(),
                        if expected { "Checkout" } else { "Complete Booking Details" }
                    );
                }
            }
        }
    }

    #[test]
    fn empty_selection_has_no_visible_lines() {
        let summary = BookingSummary::compute(
            None,
            None,
            TicketCounts::empty(),
            PriceSchedule::from_base(2500),
        );
        assert_eq!(summary.lines.len(), 3);
        assert_eq!(summary.visible_lines().count(), 0);
        assert_eq!(summary.guest_label(), None);
        assert_eq!(summary.total_cents, 0);
    }

    #[test]
    fn youth_price_rounds_to_cents() {
        assert_eq!(PriceSchedule::from_base(2500).youth_cents, 1500);
        assert_eq!(PriceSchedule::from_base(1999).youth_cents, 1199);
        assert_eq!(PriceSchedule::with_youth_pct(4000, 50).youth_cents, 2000);
    }
}
