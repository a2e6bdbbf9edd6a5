//! Tour media slideshow and image fallback handling
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::numbers::ratio;

const DEFAULT_MEDIA_DATA: &str = include_str!("../assets/data/media.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Playback length label for videos, e.g. "1:30"
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaLibrary {
    pub items: Vec<MediaItem>,
}

impl MediaLibrary {
    /// Load media items from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid media data.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(|source| DataError::Parse {
            asset: "media.json",
            source,
        })
    }

    /// Load the compiled-in media items.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_MEDIA_DATA)
    }
}

/// Auto-advancing slideshow. Time is fed in by the host through [`Slideshow::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    items: Vec<MediaItem>,
    index: usize,
    playing: bool,
    muted: bool,
    interval_ms: u32,
    elapsed_ms: u64,
}

impl Slideshow {
    #[must_use]
    pub const fn new(items: Vec<MediaItem>, auto_play: bool, interval_ms: u32) -> Self {
        Self {
            items,
            index: 0,
            playing: auto_play,
            muted: true,
            interval_ms,
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&MediaItem> {
        self.items.get(self.index)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + self.items.len() - 1) % self.items.len();
        }
    }

    /// Jump to a slide; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.items.len() {
            self.index = index;
        }
    }

    /// Play/pause. Either way the pending interval is cancelled and restarts.
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        self.elapsed_ms = 0;
        log::debug!(
            "slideshow {} at slide {}",
            if self.playing { "playing" } else { "paused" },
            self.index + 1
        );
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// A video slide finished playing.
    pub fn video_ended(&mut self) {
        if self
            .current()
            .is_some_and(|item| item.kind == MediaKind::Video)
        {
            self.next();
        }
    }

    /// Advance the timer by `delta_ms`, moving one slide per full interval
    /// while playing. Returns how many slides were advanced.
    pub fn tick(&mut self, delta_ms: u32) -> usize {
        if !self.playing || self.items.is_empty() || self.interval_ms == 0 {
            return 0;
        }
        let elapsed = self.elapsed_ms.saturating_add(u64::from(delta_ms));
        let interval = u64::from(self.interval_ms);
        let advanced = elapsed / interval;
        self.elapsed_ms = elapsed % interval;
        let len = self.items.len();
        let step = usize::try_from(advanced % u64::try_from(len).unwrap_or(u64::MAX)).unwrap_or(0);
        self.index = (self.index + step) % len;
        usize::try_from(advanced).unwrap_or(usize::MAX)
    }

    /// Fraction of the show reached, for the progress bar.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        ratio(self.index + 1, self.items.len())
    }

    /// "1 of 5"
    #[must_use]
    pub fn counter_label(&self) -> String {
        if self.items.is_empty() {
            return "0 of 0".to_string();
        }
        format!("{} of {}", self.index + 1, self.items.len())
    }
}

/// Image reference that degrades to a placeholder once loading fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    src: String,
    fallback: String,
    failed: bool,
}

impl ImageSource {
    /// Use [`crate::StorefrontData::image`] to pick up the configured placeholder.
    #[must_use]
    pub fn new(src: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fallback: fallback.into(),
            failed: false,
        }
    }

    pub fn mark_failed(&mut self) {
        if !self.failed {
            log::debug!("image failed to load, substituting placeholder: {}", self.src);
        }
        self.failed = true;
    }

    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// The URL to render: the original source, or the placeholder after a failure.
    #[must_use]
    pub fn resolve(&self) -> &str {
        if self.failed || self.src.is_empty() {
            &self.fallback
        } else {
            &self.src
        }
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.src
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(n: usize) -> MediaItem {
        MediaItem {
            kind: MediaKind::Image,
            src: format!("https://img.example/{n}.jpg"),
            alt: None,
            title: Some(format!("Slide {n}")),
            duration: None,
            poster: None,
        }
    }

    fn show(len: usize) -> Slideshow {
        Slideshow::new((0..len).map(image).collect(), true, 5_000)
    }

    #[test]
    fn embedded_media_has_five_images() {
        let library = MediaLibrary::load_from_static().unwrap();
        assert_eq!(library.items.len(), 5);
        assert!(library.items.iter().all(|i| i.kind == MediaKind::Image));
    }

    #[test]
    fn tick_advances_once_per_interval_and_wraps() {
        let mut slides = show(3);
        assert_eq!(slides.tick(4_999), 0);
        assert_eq!(slides.tick(1), 1);
        assert_eq!(slides.index(), 1);
        assert_eq!(slides.tick(10_000), 2);
        assert_eq!(slides.index(), 0);
        assert_eq!(slides.counter_label(), "1 of 3");
    }

    #[test]
    fn toggling_play_resets_the_interval() {
        let mut slides = show(3);
        slides.tick(4_000);
        slides.toggle_play();
        assert!(!slides.is_playing());
        assert_eq!(slides.tick(60_000), 0, "paused slideshow never advances");
        slides.toggle_play();
        assert_eq!(slides.tick(4_000), 0, "elapsed time was reset");
        assert_eq!(slides.tick(1_000), 1);
    }

    #[test]
    fn manual_navigation_wraps_and_ignores_bad_indices() {
        let mut slides = show(5);
        slides.prev();
        assert_eq!(slides.index(), 4);
        slides.next();
        assert_eq!(slides.index(), 0);
        slides.go_to(3);
        assert_eq!(slides.index(), 3);
        slides.go_to(9);
        assert_eq!(slides.index(), 3);
        assert!((slides.progress() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn video_end_advances_only_on_video_slides() {
        let mut items = vec![image(0), image(1)];
        items[0].kind = MediaKind::Video;
        let mut slides = Slideshow::new(items, false, 5_000);
        slides.video_ended();
        assert_eq!(slides.index(), 1);
        slides.video_ended();
        assert_eq!(slides.index(), 1);
        assert!(slides.is_muted());
        slides.toggle_mute();
        assert!(!slides.is_muted());
    }

    #[test]
    fn empty_slideshow_is_inert() {
        let mut slides = show(0);
        slides.next();
        slides.prev();
        assert_eq!(slides.tick(100_000), 0);
        assert!(slides.current().is_none());
        assert_eq!(slides.counter_label(), "0 of 0");
        assert!(slides.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn huge_ticks_wrap_without_stepping_each_slide() {
        let mut slides = Slideshow::new((0..3).map(image).collect(), true, 1);
        assert_eq!(slides.tick(u32::MAX), usize::try_from(u32::MAX).unwrap());
        // u32::MAX = 3 * 1_431_655_765
        assert_eq!(slides.index(), 0);
        assert_eq!(slides.tick(u32::MAX - 1), usize::try_from(u32::MAX - 1).unwrap());
        assert_eq!(slides.index(), 2);

        let mut slow = show(4);
        slow.tick(2_500);
        assert_eq!(slow.tick(12_500), 3);
        assert_eq!(slow.index(), 3);
        assert_eq!(slow.tick(4_999), 0);
    }

    #[test]
    fn failed_images_resolve_to_placeholder() {
        let mut img = ImageSource::new("https://img.example/broken.jpg", "placeholder.svg");
        assert_eq!(img.resolve(), "https://img.example/broken.jpg");
        img.mark_failed();
        assert!(img.has_failed());
        assert_eq!(img.resolve(), "placeholder.svg");
        assert_eq!(img.original(), "https://img.example/broken.jpg");
        assert_eq!(ImageSource::new("", "placeholder.svg").resolve(), "placeholder.svg");
    }
}
