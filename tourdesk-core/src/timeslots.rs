//! Fixed departure times offered on every bookable date
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, DataError};

const DEFAULT_TIMESLOT_DATA: &str = include_str!("../assets/data/timeslots.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Machine label, e.g. "9:00"
    pub time: String,
    /// Display label, e.g. "9:00 AM"
    pub label: String,
    pub bookable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSlotBoard {
    slots: Vec<TimeSlot>,
}

impl TimeSlotBoard {
    #[must_use]
    pub const fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    /// Load time slots from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid slot data.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(|source| DataError::Parse {
            asset: "timeslots.json",
            source,
        })
    }

    /// Load the compiled-in slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_TIMESLOT_DATA)
    }

    #[must_use]
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    #[must_use]
    pub fn find(&self, time: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.time == time)
    }

    /// Pick a slot for the chosen date. Slots are identical for every date,
    /// but a date must be chosen first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::DateRequired`] without a date, and an error if
    /// the slot is unknown or not bookable.
    pub fn select(&self, time: &str, date: Option<NaiveDate>) -> Result<&TimeSlot, BookingError> {
        if date.is_none() {
            return Err(BookingError::DateRequired);
        }
        let slot = self
            .find(time)
            .ok_or_else(|| BookingError::UnknownTimeSlot(time.to_string()))?;
        if !slot.bookable {
            return Err(BookingError::TimeSlotUnavailable(slot.time.clone()));
        }
        Ok(slot)
    }

    /// Display label for a machine time, falling back to the raw value.
    #[must_use]
    pub fn display_label<'a>(&'a self, time: &'a str) -> &'a str {
        self.find(time).map_or(time, |slot| slot.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, day)
    }

    #[test]
    fn embedded_board_has_four_slots() {
        let board = TimeSlotBoard::load_from_static().unwrap();
        let times: Vec<&str> = board.slots().iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["9:00", "11:30", "14:00", "16:30"]);
        assert_eq!(board.slots().iter().filter(|s| s.bookable).count(), 3);
    }

    #[test]
    fn selecting_requires_a_date() {
        let board = TimeSlotBoard::load_from_static().unwrap();
        assert_eq!(board.select("9:00", None), Err(BookingError::DateRequired));
        assert_eq!(board.select("9:00", june(18)).unwrap().label, "9:00 AM");
    }

    #[test]
    fn unavailable_and_unknown_slots_are_rejected() {
        let board = TimeSlotBoard::load_from_static().unwrap();
        assert_eq!(
            board.select("14:00", june(18)),
            Err(BookingError::TimeSlotUnavailable("14:00".to_string()))
        );
        assert_eq!(
            board.select("7:15", june(18)),
            Err(BookingError::UnknownTimeSlot("7:15".to_string()))
        );
    }

    #[test]
    fn display_labels_fall_back_to_raw_time() {
        let board = TimeSlotBoard::load_from_static().unwrap();
        assert_eq!(board.display_label("14:00"), "2:00 PM");
        assert_eq!(board.display_label("16:30"), "4:30 PM");
        assert_eq!(board.display_label("18:00"), "18:00");
    }
}
