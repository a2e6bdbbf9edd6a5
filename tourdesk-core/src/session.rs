//! Storefront session: page flow and the in-progress booking selection
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{DateSelection, DayCell, MonthCursor};
use crate::booking::{BookingSummary, PriceSchedule};
use crate::catalog::{Tour, TourQuery};
use crate::checkout::{CheckoutHandler, CheckoutRequest};
use crate::data::StorefrontData;
use crate::error::{BookingError, CheckoutError};
use crate::filters::FilterState;
use crate::media::Slideshow;
use crate::tickets::{TicketCounts, TicketKind};
use crate::timeslots::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Catalog,
    TourDetail,
}

/// Which picker the booking sidebar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStage {
    #[default]
    ChooseDate,
    ChooseTime,
}

/// The user's in-progress choice for one tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub tour_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub tickets: TicketCounts,
    /// Adult price for the chosen date; the tour's list price until a date is picked
    pub base_price_cents: i64,
}

impl BookingSelection {
    #[must_use]
    pub const fn empty(default_adults: u32) -> Self {
        Self {
            tour_id: None,
            date: None,
            time: None,
            tickets: TicketCounts::with_default_adults(default_adults),
            base_price_cents: 0,
        }
    }

    #[must_use]
    pub fn for_tour(tour: &Tour, default_adults: u32) -> Self {
        Self {
            tour_id: Some(tour.id.clone()),
            base_price_cents: tour.price_cents,
            ..Self::empty(default_adults)
        }
    }
}

/// High-level session wrapper binding storefront data to transient UI state.
#[derive(Debug, Clone)]
pub struct BookingSession {
    data: StorefrontData,
    today: NaiveDate,
    page: Page,
    stage: BookingStage,
    month: MonthCursor,
    selection: BookingSelection,
    query: TourQuery,
    filters: FilterState,
    slideshow: Slideshow,
}

impl BookingSession {
    /// Start on the catalog page with nothing selected.
    #[must_use]
    pub fn new(data: StorefrontData, today: NaiveDate) -> Self {
        let month = data.calendar.month();
        let selection = BookingSelection::empty(data.config.default_adults);
        let filters = FilterState::new(&data.config);
        let slideshow = Self::build_slideshow(&data);
        Self {
            data,
            today,
            page: Page::Catalog,
            stage: BookingStage::ChooseDate,
            month,
            selection,
            query: TourQuery::default(),
            filters,
            slideshow,
        }
    }

    fn build_slideshow(data: &StorefrontData) -> Slideshow {
        Slideshow::new(
            data.media.items.clone(),
            true,
            data.config.detail_slideshow_interval_ms,
        )
    }

    #[must_use]
    pub const fn data(&self) -> &StorefrontData {
        &self.data
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move "today" forward or back. Selections already made are kept.
    pub const fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub const fn stage(&self) -> BookingStage {
        self.stage
    }

    #[must_use]
    pub const fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    #[must_use]
    pub const fn tickets(&self) -> TicketCounts {
        self.selection.tickets
    }

    // Catalog page ------------------------------------------------------------

    #[must_use]
    pub const fn query(&self) -> &TourQuery {
        &self.query
    }

    pub const fn query_mut(&mut self) -> &mut TourQuery {
        &mut self.query
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub const fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Catalog listing after the search bar, dropdowns, and filter panel.
    #[must_use]
    pub fn visible_tours(&self) -> Vec<&Tour> {
        let listed = self.data.catalog.query(&self.query);
        self.filters.apply(listed)
    }

    /// Open a tour. The booking selection is reset unconditionally, even when
    /// the same tour is opened again.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownTour`] if no tour has this id; the
    /// session is left unchanged.
    pub fn select_tour(&mut self, tour_id: &str) -> Result<&Tour, BookingError> {
        let Some(tour) = self.data.catalog.find(tour_id) else {
            log::debug!("rejected unknown tour {tour_id}");
            return Err(BookingError::UnknownTour(tour_id.to_string()));
        };
        self.selection = BookingSelection::for_tour(tour, self.data.config.default_adults);
        self.page = Page::TourDetail;
        self.stage = BookingStage::ChooseDate;
        self.month = self.data.calendar.month();
        self.slideshow = Self::build_slideshow(&self.data);
        log::debug!("opened tour {} ({})", tour.id, tour.title);
        Ok(tour)
    }

    /// Return to the listing. The selection stays until the next tour is opened.
    pub fn back_to_catalog(&mut self) {
        self.page = Page::Catalog;
    }

    #[must_use]
    pub fn current_tour(&self) -> Option<&Tour> {
        self.selection
            .tour_id
            .as_deref()
            .and_then(|id| self.data.catalog.find(id))
    }

    // Date picker -------------------------------------------------------------

    #[must_use]
    pub const fn month(&self) -> MonthCursor {
        self.month
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    #[must_use]
    pub fn calendar_cells(&self) -> Vec<DayCell> {
        self.data.calendar.day_cells(self.month, self.today)
    }

    fn require_detail(&self) -> Result<(), BookingError> {
        if self.page == Page::TourDetail && self.selection.tour_id.is_some() {
            Ok(())
        } else {
            Err(BookingError::NoTourSelected)
        }
    }

    /// Pick a day of the displayed month. Any chosen time is cleared and the
    /// sidebar moves on to the time picker.
    ///
    /// # Errors
    ///
    /// Returns an error if no tour is open or the day is not selectable.
    pub fn pick_date(&mut self, day: u32) -> Result<DateSelection, BookingError> {
        self.require_detail()?;
        let picked = self
            .data
            .calendar
            .select(self.month, day, self.today)
            .inspect_err(|err| log::debug!("rejected date pick: {err}"))?;
        self.selection.date = Some(picked.date);
        self.selection.base_price_cents = picked.price_cents;
        self.selection.time = None;
        self.stage = BookingStage::ChooseTime;
        log::debug!(
            "picked {} at {} ({})",
            picked.date,
            crate::numbers::format_cents(picked.price_cents),
            picked.tier
        );
        Ok(picked)
    }

    /// Show the date picker again; date and time stay selected.
    pub fn back_to_dates(&mut self) {
        self.stage = BookingStage::ChooseDate;
    }

    // Time picker -------------------------------------------------------------

    #[must_use]
    pub fn time_slots(&self) -> &[TimeSlot] {
        self.data.time_slots.slots()
    }

    /// Pick a departure time for the chosen date.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::DateRequired`] before a date is chosen, and an
    /// error if the slot is unknown or unavailable.
    pub fn pick_time(&mut self, time: &str) -> Result<&TimeSlot, BookingError> {
        self.require_detail()?;
        let slot = self
            .data
            .time_slots
            .select(time, self.selection.date)
            .inspect_err(|err| log::debug!("rejected time pick: {err}"))?;
        self.selection.time = Some(slot.time.clone());
        log::debug!("picked time {}", slot.label);
        Ok(slot)
    }

    // Tickets -----------------------------------------------------------------

    pub fn increment_ticket(&mut self, kind: TicketKind) -> u32 {
        self.selection.tickets.increment(kind)
    }

    /// Clamps at zero.
    pub fn decrement_ticket(&mut self, kind: TicketKind) -> u32 {
        self.selection.tickets.decrement(kind)
    }

    // Summary and checkout ----------------------------------------------------

    #[must_use]
    pub fn price_schedule(&self) -> PriceSchedule {
        PriceSchedule::with_youth_pct(
            self.selection.base_price_cents,
            self.data.config.youth_price_pct,
        )
    }

    #[must_use]
    pub fn summary(&self) -> BookingSummary {
        BookingSummary::compute(
            self.selection.date,
            self.selection.time.as_deref(),
            self.selection.tickets,
            self.price_schedule(),
        )
    }

    #[must_use]
    pub fn time_label(&self) -> Option<&str> {
        self.selection
            .time
            .as_deref()
            .map(|time| self.data.time_slots.display_label(time))
    }

    /// Hand the finished booking to the checkout collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Incomplete`] (or [`BookingError::NoTourSelected`])
    /// when checkout is not enabled, and the handler's error if the handoff fails.
    pub fn checkout<H: CheckoutHandler>(
        &self,
        handler: &mut H,
    ) -> Result<CheckoutRequest, CheckoutError<H::Error>> {
        self.require_detail()?;
        let summary = self.summary();
        let tour = self.current_tour().ok_or(BookingError::NoTourSelected)?;
        let (Some(date), Some(time), true) =
            (summary.date, summary.time.clone(), summary.complete)
        else {
            return Err(BookingError::Incomplete.into());
        };
        let request = CheckoutRequest {
            tour_id: tour.id.clone(),
            tour_title: tour.title.clone(),
            date,
            time,
            tickets: self.selection.tickets,
            total_cents: summary.total_cents,
        };
        handler.submit(&request).map_err(CheckoutError::Handoff)?;
        log::debug!(
            "checkout handed off for tour {} total {}",
            request.tour_id,
            request.total_label()
        );
        Ok(request)
    }

    // Media -------------------------------------------------------------------

    #[must_use]
    pub const fn slideshow(&self) -> &Slideshow {
        &self.slideshow
    }

    pub const fn slideshow_mut(&mut self) -> &mut Slideshow {
        &mut self.slideshow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::RecordedCheckouts;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn session() -> BookingSession {
        BookingSession::new(StorefrontData::load_from_static().unwrap(), june(10))
    }

    #[test]
    fn opening_a_tour_resets_selection() {
        let mut session = session();
        session.select_tour("1").unwrap();
        assert_eq!(session.page(), Page::TourDetail);
        assert_eq!(session.selection().base_price_cents, 2500);
        session.increment_ticket(TicketKind::Youth);
        session.pick_date(18).unwrap();
        session.pick_time("9:00").unwrap();

        session.back_to_catalog();
        assert_eq!(session.page(), Page::Catalog);
        session.select_tour("4").unwrap();
        let selection = session.selection();
        assert_eq!(selection.tickets, TicketCounts::new(2, 0, 0));
        assert_eq!(selection.date, None);
        assert_eq!(selection.time, None);
        assert_eq!(selection.tour_id.as_deref(), Some("4"));
        assert_eq!(session.stage(), BookingStage::ChooseDate);
    }

    #[test]
    fn picking_a_date_clears_time() {
        let mut session = session();
        session.select_tour("1").unwrap();
        session.pick_date(18).unwrap();
        session.pick_time("11:30").unwrap();
        assert_eq!(session.time_label(), Some("11:30 AM"));
        session.back_to_dates();
        assert_eq!(session.selection().time.as_deref(), Some("11:30"));
        let picked = session.pick_date(14).unwrap();
        assert_eq!(picked.price_cents, 5000);
        assert_eq!(session.selection().time, None);
        assert_eq!(session.stage(), BookingStage::ChooseTime);
    }

    #[test]
    fn rejected_picks_leave_state_untouched() {
        let mut session = session();
        assert_eq!(session.pick_date(18), Err(BookingError::NoTourSelected));
        session.select_tour("2").unwrap();
        assert_eq!(session.pick_time("9:00").unwrap_err(), BookingError::DateRequired);
        session.pick_date(18).unwrap();
        session.pick_time("9:00").unwrap();
        let before = session.selection().clone();
        assert!(session.pick_date(16).is_err());
        assert!(session.pick_time("14:00").is_err());
        assert_eq!(session.selection(), &before);
        assert!(matches!(
            session.select_tour("99"),
            Err(BookingError::UnknownTour(_))
        ));
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn checkout_requires_complete_booking() {
        let mut session = session();
        let mut handler = RecordedCheckouts::new();
        session.select_tour("1").unwrap();
        assert!(matches!(
            session.checkout(&mut handler),
            Err(CheckoutError::Booking(BookingError::Incomplete))
        ));
        session.pick_date(18).unwrap();
        session.pick_time("16:30").unwrap();
        session.decrement_ticket(TicketKind::Adult);
        session.decrement_ticket(TicketKind::Adult);
        assert!(session.checkout(&mut handler).is_err());
        session.increment_ticket(TicketKind::Child);
        let request = session.checkout(&mut handler).unwrap();
        assert_eq!(request.total_cents, 0);
        assert_eq!(request.tickets, TicketCounts::new(0, 0, 1));
        assert_eq!(handler.requests().len(), 1);
    }

    #[test]
    fn visible_tours_combine_query_and_panel() {
        let mut session = session();
        session.query_mut().search = "tour".to_string();
        assert_eq!(session.visible_tours().len(), 2);
        session
            .filters_mut()
            .toggle_category(crate::catalog::Category::Photography, true);
        let ids: Vec<&str> = session.visible_tours().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
    }

    #[test]
    fn month_navigation_reuses_the_day_table() {
        let mut session = session();
        session.select_tour("1").unwrap();
        session.next_month();
        let selectable = session.calendar_cells().iter().filter(|c| c.selectable).count();
        assert_eq!(selectable, 16);
        let picked = session.pick_date(18).unwrap();
        assert_eq!(picked.date, NaiveDate::from_ymd_opt(2025, 7, 18).unwrap());
        session.prev_month();
        session.prev_month();
        assert!(matches!(
            session.pick_date(18),
            Err(BookingError::DateInPast { .. })
        ));
        assert_eq!(
            session.selection().date,
            NaiveDate::from_ymd_opt(2025, 7, 18)
        );
    }

    #[test]
    fn advancing_today_closes_earlier_days_but_keeps_selection() {
        let mut session = session();
        session.select_tour("1").unwrap();
        session.pick_date(12).unwrap();
        session.set_today(june(20));
        assert_eq!(session.today(), june(20));
        assert_eq!(session.selection().date, Some(june(12)));
        assert!(matches!(
            session.pick_date(15),
            Err(BookingError::DateInPast { .. })
        ));
        let first_open = session
            .calendar_cells()
            .into_iter()
            .find(|c| c.selectable)
            .map(|c| c.day);
        assert_eq!(first_open, Some(20));
    }

    #[test]
    fn every_date_repick_clears_every_time() {
        let mut session = session();
        session.select_tour("3").unwrap();
        let days: Vec<u32> = session
            .calendar_cells()
            .iter()
            .filter(|c| c.selectable)
            .map(|c| c.day)
            .collect();
        let times: Vec<String> = session
            .data()
            .time_slots
            .slots()
            .iter()
            .filter(|slot| slot.bookable)
            .map(|slot| slot.time.clone())
            .collect();
        assert!(!days.is_empty() && !times.is_empty());
        for &first in &days {
            for time in &times {
                session.pick_date(first).unwrap();
                session.pick_time(time).unwrap();
                for &next in &days {
                    session.pick_date(next).unwrap();
                    assert_eq!(session.selection().time, None, "{first}/{time} -> {next}");
                    assert_eq!(session.stage(), BookingStage::ChooseTime);
                    session.pick_time(time).unwrap();
                }
            }
        }
    }
}
