//! Handoff of a finished booking to an external checkout collaborator
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::numbers::format_cents;
use crate::tickets::TicketCounts;

/// Finalized booking handed to the payment/checkout collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub tour_id: String,
    pub tour_title: String,
    pub date: NaiveDate,
    pub time: String,
    pub tickets: TicketCounts,
    pub total_cents: i64,
}

impl CheckoutRequest {
    #[must_use]
    pub fn total_label(&self) -> String {
        format_cents(self.total_cents)
    }
}

/// Trait for abstracting the checkout handoff.
/// Platform-specific implementations should provide this; the protocol
/// behind it is owned by the collaborator.
pub trait CheckoutHandler {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Hand over a complete booking
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator rejects the handoff.
    fn submit(&mut self, request: &CheckoutRequest) -> Result<(), Self::Error>;
}

/// In-memory handler that records every handoff, for hosts that defer
/// payment integration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedCheckouts {
    requests: Vec<CheckoutRequest>,
}

impl RecordedCheckouts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> &[CheckoutRequest] {
        &self.requests
    }

    #[must_use]
    pub fn last(&self) -> Option<&CheckoutRequest> {
        self.requests.last()
    }
}

impl CheckoutHandler for RecordedCheckouts {
    type Error = Infallible;

    fn submit(&mut self, request: &CheckoutRequest) -> Result<(), Self::Error> {
        self.requests.push(request.clone());
        Ok(())
    }
}
