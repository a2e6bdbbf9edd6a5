//! Centralized storefront constants.
//!
//! Pricing and session defaults live here so they can only be adjusted via
//! reviewed code changes. Tunables that the front end may override are also
//! mirrored in `assets/data/config.json`.

// Pricing -------------------------------------------------------------------
pub(crate) const YOUTH_PRICE_PCT: u32 = 60;
pub(crate) const CHILD_PRICE_CENTS: i64 = 0;

// Session defaults ----------------------------------------------------------
pub(crate) const DEFAULT_ADULTS: u32 = 2;
pub(crate) const DEFAULT_YOUTH: u32 = 0;
pub(crate) const DEFAULT_CHILDREN: u32 = 0;

// Media ---------------------------------------------------------------------
pub(crate) const SLIDESHOW_INTERVAL_MS: u32 = 5_000;
pub(crate) const DETAIL_SLIDESHOW_INTERVAL_MS: u32 = 6_000;
pub(crate) const FALLBACK_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI4OCIgaGVpZ2h0PSI4OCIvPg==";

// Filter panel --------------------------------------------------------------
pub(crate) const PRICE_RANGE_MAX: u32 = 100;
pub(crate) const PRICE_RANGE_STEP: u32 = 5;
pub(crate) const SHORT_TOUR_MAX_HOURS: f32 = 3.0;
pub(crate) const FULL_DAY_MIN_HOURS: f32 = 6.0;
pub(crate) const INTIMATE_GROUP_MAX: u32 = 6;
pub(crate) const SMALL_GROUP_MAX: u32 = 12;

// Catalog sentinels ---------------------------------------------------------
pub(crate) const FILTER_ALL: &str = "all";
