//! Numeric helpers centralizing money arithmetic and safe numeric casts.

use num_traits::cast::cast;

/// Take `pct` percent of an amount in cents, rounding half away from zero.
#[must_use]
pub fn percent_of_cents(cents: i64, pct: u32) -> i64 {
    let scaled = i128::from(cents) * i128::from(pct);
    let rounded = if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    };
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Multiply a unit price in cents by a quantity, saturating at the i64 range.
#[must_use]
pub fn line_total_cents(unit_cents: i64, quantity: u32) -> i64 {
    unit_cents.saturating_mul(i64::from(quantity))
}

/// Render cents as a dollar amount with two decimals (`$104.00`).
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Render whole-dollar amounts without decimals (`$25`), falling back to
/// [`format_cents`] when there is a fractional part.
#[must_use]
pub fn format_cents_compact(cents: i64) -> String {
    if cents % 100 == 0 {
        let sign = if cents < 0 { "-" } else { "" };
        format!("{sign}${}", cents.unsigned_abs() / 100)
    } else {
        format_cents(cents)
    }
}

/// Ratio of two counts as f64, returning 0.0 when the denominator is zero.
#[must_use]
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let num = cast::<usize, f64>(numerator).unwrap_or(0.0);
    let den = cast::<usize, f64>(denominator).unwrap_or(1.0);
    num / den
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of_cents(4000, 60), 2400);
        assert_eq!(percent_of_cents(2500, 60), 1500);
        assert_eq!(percent_of_cents(1, 50), 1);
        assert_eq!(percent_of_cents(0, 60), 0);
    }

    #[test]
    fn line_totals_saturate() {
        assert_eq!(line_total_cents(4000, 2), 8000);
        assert_eq!(line_total_cents(i64::MAX, 2), i64::MAX);
    }

    #[test]
    fn formats_dollars() {
        assert_eq!(format_cents(10_400), "$104.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(-250), "-$2.50");
        assert_eq!(format_cents_compact(2500), "$25");
        assert_eq!(format_cents_compact(2450), "$24.50");
    }

    #[test]
    fn ratio_handles_zero() {
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
        assert!(ratio(3, 0).abs() < f64::EPSILON);
    }
}
