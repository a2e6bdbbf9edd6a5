//! Ticket types and per-type counts
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_ADULTS, DEFAULT_CHILDREN, DEFAULT_YOUTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    Adult,
    Youth,
    Child,
}

impl TicketKind {
    pub const ALL: [Self; 3] = [Self::Adult, Self::Youth, Self::Child];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Adult => "Adults",
            Self::Youth => "Youth",
            Self::Child => "Children",
        }
    }

    #[must_use]
    pub const fn age_band(self) -> &'static str {
        match self {
            Self::Adult => "Age 18+",
            Self::Youth => "Age 12-17",
            Self::Child => "Age 0-11",
        }
    }

    /// Noun for a line item, pluralized by quantity.
    #[must_use]
    pub const fn noun(self, quantity: u32) -> &'static str {
        match (self, quantity) {
            (Self::Adult, 1) => "Adult",
            (Self::Adult, _) => "Adults",
            (Self::Youth, _) => "Youth",
            (Self::Child, 1) => "Child",
            (Self::Child, _) => "Children",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tickets chosen for one booking. Counts never go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketCounts {
    pub adults: u32,
    pub youth: u32,
    pub children: u32,
}

impl Default for TicketCounts {
    fn default() -> Self {
        Self {
            adults: DEFAULT_ADULTS,
            youth: DEFAULT_YOUTH,
            children: DEFAULT_CHILDREN,
        }
    }
}

impl TicketCounts {
    #[must_use]
    pub const fn new(adults: u32, youth: u32, children: u32) -> Self {
        Self {
            adults,
            youth,
            children,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    /// Session default with a configurable adult count.
    #[must_use]
    pub const fn with_default_adults(adults: u32) -> Self {
        Self::new(adults, DEFAULT_YOUTH, DEFAULT_CHILDREN)
    }

    #[must_use]
    pub const fn count(&self, kind: TicketKind) -> u32 {
        match kind {
            TicketKind::Adult => self.adults,
            TicketKind::Youth => self.youth,
            TicketKind::Child => self.children,
        }
    }

    const fn slot_mut(&mut self, kind: TicketKind) -> &mut u32 {
        match kind {
            TicketKind::Adult => &mut self.adults,
            TicketKind::Youth => &mut self.youth,
            TicketKind::Child => &mut self.children,
        }
    }

    /// Returns the new count for `kind`.
    pub fn increment(&mut self, kind: TicketKind) -> u32 {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Decrement clamps at zero. Returns the new count for `kind`.
    pub fn decrement(&mut self, kind: TicketKind) -> u32 {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_sub(1);
        *slot
    }

    /// Whether the minus control is enabled.
    #[must_use]
    pub const fn can_decrement(&self, kind: TicketKind) -> bool {
        self.count(kind) > 0
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.youth)
            .saturating_add(self.children)
    }
}
