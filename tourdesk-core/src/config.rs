//! Storefront tunables loaded from the embedded config asset.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ADULTS, DETAIL_SLIDESHOW_INTERVAL_MS, FALLBACK_IMAGE, PRICE_RANGE_MAX,
    PRICE_RANGE_STEP, SLIDESHOW_INTERVAL_MS, YOUTH_PRICE_PCT,
};

const DEFAULT_CONFIG_DATA: &str = include_str!("../assets/data/config.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Youth ticket price as a percentage of the adult price
    #[serde(default = "StorefrontConfig::default_youth_price_pct")]
    pub youth_price_pct: u32,
    /// Adult tickets preselected whenever a tour is opened
    #[serde(default = "StorefrontConfig::default_adults")]
    pub default_adults: u32,
    #[serde(default = "StorefrontConfig::default_slideshow_interval_ms")]
    pub slideshow_interval_ms: u32,
    #[serde(default = "StorefrontConfig::default_detail_slideshow_interval_ms")]
    pub detail_slideshow_interval_ms: u32,
    /// Upper bound of the price slider in whole dollars; the top value means "and above"
    #[serde(default = "StorefrontConfig::default_price_range_max")]
    pub price_range_max: u32,
    #[serde(default = "StorefrontConfig::default_price_range_step")]
    pub price_range_step: u32,
    #[serde(default = "StorefrontConfig::default_fallback_image")]
    pub fallback_image: String,
}

impl StorefrontConfig {
    const fn default_youth_price_pct() -> u32 {
        YOUTH_PRICE_PCT
    }

    const fn default_adults() -> u32 {
        DEFAULT_ADULTS
    }

    const fn default_slideshow_interval_ms() -> u32 {
        SLIDESHOW_INTERVAL_MS
    }

    const fn default_detail_slideshow_interval_ms() -> u32 {
        DETAIL_SLIDESHOW_INTERVAL_MS
    }

    const fn default_price_range_max() -> u32 {
        PRICE_RANGE_MAX
    }

    const fn default_price_range_step() -> u32 {
        PRICE_RANGE_STEP
    }

    fn default_fallback_image() -> String {
        FALLBACK_IMAGE.to_string()
    }

    /// Compiled-in values, independent of the JSON asset.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            youth_price_pct: YOUTH_PRICE_PCT,
            default_adults: DEFAULT_ADULTS,
            slideshow_interval_ms: SLIDESHOW_INTERVAL_MS,
            detail_slideshow_interval_ms: DETAIL_SLIDESHOW_INTERVAL_MS,
            price_range_max: PRICE_RANGE_MAX,
            price_range_step: PRICE_RANGE_STEP,
            fallback_image: FALLBACK_IMAGE.to_string(),
        }
    }

    /// Parse a config from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        serde_json::from_str(DEFAULT_CONFIG_DATA).unwrap_or_else(|err| {
            log::warn!("embedded storefront config unreadable, using built-ins: {err}");
            Self::builtin()
        })
    }
}
