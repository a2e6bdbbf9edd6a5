//! Tourdesk Storefront Engine
//!
//! Platform-agnostic core logic for the Tourdesk tour-booking storefront.
//! This crate provides catalog browsing, availability, and booking aggregation
//! without UI or platform-specific dependencies.
#![forbid(unsafe_code)]

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod filters;
pub mod media;
pub mod numbers;
pub mod session;
pub mod tickets;
pub mod timeslots;

// Re-export commonly used types
pub use availability::{
    AvailabilityCalendar, AvailabilityTier, DateSelection, DayAvailability, DayCell, MonthCursor,
};
pub use booking::{BookingSummary, LineItem, PriceSchedule, is_complete};
pub use catalog::{
    Catalog, Category, Difficulty, Filter, SortKey, Tour, TourBadge, TourQuery, result_count_label,
};
pub use checkout::{CheckoutHandler, CheckoutRequest, RecordedCheckouts};
pub use config::StorefrontConfig;
pub use data::{DataLoader, EmbeddedData, StorefrontData};
pub use error::{BookingError, CheckoutError, DataError};
pub use filters::{DurationBucket, FilterState, GroupSizeBucket};
pub use media::{ImageSource, MediaItem, MediaKind, MediaLibrary, Slideshow};
pub use session::{BookingSelection, BookingSession, BookingStage, Page};
pub use tickets::{TicketCounts, TicketKind};
pub use timeslots::{TimeSlot, TimeSlotBoard};

use chrono::NaiveDate;

/// Main storefront engine binding a data source to a checkout collaborator
pub struct StorefrontEngine<L, C>
where
    L: DataLoader,
    C: CheckoutHandler,
{
    data_loader: L,
    checkout: C,
}

impl<L, C> StorefrontEngine<L, C>
where
    L: DataLoader,
    C: CheckoutHandler,
{
    /// Create a new engine with the provided data loader and checkout handler
    pub const fn new(data_loader: L, checkout: C) -> Self {
        Self {
            data_loader,
            checkout,
        }
    }

    /// Open a fresh storefront session on the catalog page.
    ///
    /// # Errors
    ///
    /// Returns an error if the storefront data cannot be loaded.
    pub fn create_session(&self, today: NaiveDate) -> Result<BookingSession, L::Error> {
        let data = self.data_loader.load_storefront()?;
        log::debug!(
            "storefront session opened with {} tours for {}",
            data.catalog.len(),
            data.calendar.month().label()
        );
        Ok(BookingSession::new(data, today))
    }

    /// Hand the session's booking to this engine's checkout handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is incomplete or the handoff fails.
    pub fn checkout(
        &mut self,
        session: &BookingSession,
    ) -> Result<CheckoutRequest, CheckoutError<C::Error>> {
        session.checkout(&mut self.checkout)
    }

    #[must_use]
    pub const fn checkout_handler(&self) -> &C {
        &self.checkout
    }
}
