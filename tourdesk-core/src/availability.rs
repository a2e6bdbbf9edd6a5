//! Per-day pricing and availability for the booking calendar
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{BookingError, DataError};

const DEFAULT_CALENDAR_DATA: &str = include_str!("../assets/data/calendar.json");

/// Pricing/demand classification for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityTier {
    Standard,
    Premium,
    HighDemand,
    Unavailable,
}

impl AvailabilityTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::HighDemand => "high-demand",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for AvailabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub price_cents: i64,
    pub tier: AvailabilityTier,
    pub bookable: bool,
}

/// A year/month pair addressed by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    #[must_use]
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    #[must_use]
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.next()
            .first
            .pred_opt()
            .filter(|last| last.month() == self.month())
            .map_or(31, |last| last.day())
    }

    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Empty grid cells before day 1 in a Monday-first week.
    #[must_use]
    pub fn leading_blank_cells(self) -> u32 {
        self.first.weekday().num_days_from_monday()
    }

    /// "June 2025"
    #[must_use]
    pub fn label(self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

/// One day of the rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub availability: Option<DayAvailability>,
    pub selectable: bool,
}

impl DayCell {
    /// Price shown under the day number; hidden for unselectable days.
    #[must_use]
    pub fn display_price_cents(&self) -> Option<i64> {
        self.availability
            .filter(|_| self.selectable)
            .map(|entry| entry.price_cents)
    }
}

/// Outcome of picking a bookable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub date: NaiveDate,
    pub price_cents: i64,
    pub tier: AvailabilityTier,
}

#[derive(Deserialize)]
struct CalendarFile {
    year: i32,
    month: u32,
    days: BTreeMap<u32, DayAvailability>,
}

/// Day-keyed availability entries, applied to whichever month is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    month: MonthCursor,
    days: BTreeMap<u32, DayAvailability>,
}

impl AvailabilityCalendar {
    /// Build a calendar, validating the month and every keyed day.
    ///
    /// # Errors
    ///
    /// Returns an error if the month does not exist or a day falls outside it.
    pub fn new(
        year: i32,
        month: u32,
        days: BTreeMap<u32, DayAvailability>,
    ) -> Result<Self, DataError> {
        let cursor = MonthCursor::new(year, month).ok_or(DataError::InvalidMonth { year, month })?;
        if let Some(&day) = days
            .keys()
            .find(|&&day| day == 0 || day > cursor.days_in_month())
        {
            return Err(DataError::InvalidDay { year, month, day });
        }
        Ok(Self {
            month: cursor,
            days,
        })
    }

    /// Load calendar data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or names an invalid date.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let file: CalendarFile = serde_json::from_str(json).map_err(|source| DataError::Parse {
            asset: "calendar.json",
            source,
        })?;
        Self::new(file.year, file.month, file.days)
    }

    /// Load the compiled-in calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_CALENDAR_DATA)
    }

    /// The month the calendar opens on.
    #[must_use]
    pub const fn month(&self) -> MonthCursor {
        self.month
    }

    /// Entry for a day-of-month. The same table serves every month.
    #[must_use]
    pub fn entry(&self, day: u32) -> Option<DayAvailability> {
        self.days.get(&day).copied()
    }

    fn is_selectable(entry: Option<DayAvailability>, date: NaiveDate, today: NaiveDate) -> bool {
        entry.is_some_and(|e| e.bookable) && date >= today
    }

    /// Every day of `month` with its selectability relative to `today`.
    #[must_use]
    pub fn day_cells(&self, month: MonthCursor, today: NaiveDate) -> Vec<DayCell> {
        (1..=month.days_in_month())
            .filter_map(|day| {
                let date = month.date(day)?;
                let availability = self.entry(day);
                Some(DayCell {
                    day,
                    date,
                    availability,
                    selectable: Self::is_selectable(availability, date, today),
                })
            })
            .collect()
    }

    /// Pick a day of `month`.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is outside the month, has no bookable
    /// entry, or lies before `today`.
    pub fn select(
        &self,
        month: MonthCursor,
        day: u32,
        today: NaiveDate,
    ) -> Result<DateSelection, BookingError> {
        let date = month
            .date(day)
            .ok_or_else(|| BookingError::DayOutOfRange {
                day,
                month_label: month.label(),
            })?;
        let entry = self
            .entry(day)
            .filter(|e| e.bookable)
            .ok_or(BookingError::DateUnavailable(date))?;
        if date < today {
            return Err(BookingError::DateInPast { date, today });
        }
        Ok(DateSelection {
            date,
            price_cents: entry.price_cents,
            tier: entry.tier,
        })
    }
}
