//! Error types surfaced by storefront operations.
use chrono::NaiveDate;
use thiserror::Error;

/// Rejected booking interactions. The operation leaves state untouched, so
/// the caller can render the matching control as disabled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("unknown tour {0}")]
    UnknownTour(String),
    #[error("day {day} is outside {month_label}")]
    DayOutOfRange { day: u32, month_label: String },
    #[error("{0} is not bookable")]
    DateUnavailable(NaiveDate),
    #[error("{date} is before {today}")]
    DateInPast { date: NaiveDate, today: NaiveDate },
    #[error("select a date first")]
    DateRequired,
    #[error("unknown time slot {0}")]
    UnknownTimeSlot(String),
    #[error("time slot {0} is not bookable")]
    TimeSlotUnavailable(String),
    #[error("no tour is open")]
    NoTourSelected,
    #[error("booking is incomplete: select date, time, and tickets to continue")]
    Incomplete,
}

/// Failures while parsing the embedded storefront assets.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse {asset}: {source}")]
    Parse {
        asset: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("calendar day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[error("duplicate tour id {0}")]
    DuplicateTour(String),
}

/// Failure of a checkout attempt: either the booking was not ready or the
/// external collaborator refused the handoff.
#[derive(Debug, Error)]
pub enum CheckoutError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("checkout handoff failed")]
    Handoff(#[source] E),
}
