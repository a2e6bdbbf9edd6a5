use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

pub fn parse_today(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid --today value {s:?}, expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" smoke, ,booking-totals,  checkout-gate ");
        assert_eq!(parts, vec!["smoke", "booking-totals", "checkout-gate"]);
    }

    #[test]
    fn parse_today_accepts_iso_dates_only() {
        assert_eq!(
            parse_today(" 2025-06-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
        let err = parse_today("06/10/2025").unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }
}
