//! Storefront data bundle and its embedded loader
use crate::availability::AvailabilityCalendar;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::DataError;
use crate::media::{ImageSource, MediaLibrary, Slideshow};
use crate::timeslots::TimeSlotBoard;

/// Everything the storefront reads: catalog, availability, slots, media, tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontData {
    pub catalog: Catalog,
    pub calendar: AvailabilityCalendar,
    pub time_slots: TimeSlotBoard,
    pub media: MediaLibrary,
    pub config: StorefrontConfig,
}

impl StorefrontData {
    /// Parse every compiled-in asset.
    ///
    /// # Errors
    ///
    /// Returns an error if any embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Ok(Self {
            catalog: Catalog::load_from_static()?,
            calendar: AvailabilityCalendar::load_from_static()?,
            time_slots: TimeSlotBoard::load_from_static()?,
            media: MediaLibrary::load_from_static()?,
            config: StorefrontConfig::load_from_static(),
        })
    }

    /// Image that falls back to the configured placeholder.
    #[must_use]
    pub fn image(&self, src: impl Into<String>) -> ImageSource {
        ImageSource::new(src, self.config.fallback_image.clone())
    }

    /// Auto-playing slideshow over the media library at the standard interval.
    #[must_use]
    pub fn gallery_slideshow(&self) -> Slideshow {
        Slideshow::new(self.media.items.clone(), true, self.config.slideshow_interval_ms)
    }
}

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the storefront data bundle from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be loaded.
    fn load_storefront(&self) -> Result<StorefrontData, Self::Error>;
}

/// Loader backed by the JSON assets compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedData;

impl DataLoader for EmbeddedData {
    type Error = DataError;

    fn load_storefront(&self) -> Result<StorefrontData, Self::Error> {
        StorefrontData::load_from_static()
    }
}
