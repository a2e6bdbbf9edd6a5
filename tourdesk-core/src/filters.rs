//! Multi-select filter panel state
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Category, Difficulty, Tour};
use crate::config::StorefrontConfig;
use crate::constants::{
    FULL_DAY_MIN_HOURS, INTIMATE_GROUP_MAX, PRICE_RANGE_MAX, PRICE_RANGE_STEP,
    SHORT_TOUR_MAX_HOURS, SMALL_GROUP_MAX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationBucket {
    Short,
    HalfDay,
    FullDay,
}

impl DurationBucket {
    pub const ALL: [Self; 3] = [Self::Short, Self::HalfDay, Self::FullDay];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "Short (1-3 hours)",
            Self::HalfDay => "Half Day (3-6 hours)",
            Self::FullDay => "Full Day (6+ hours)",
        }
    }

    #[must_use]
    pub fn from_hours(hours: f32) -> Self {
        if hours <= SHORT_TOUR_MAX_HOURS {
            Self::Short
        } else if hours < FULL_DAY_MIN_HOURS {
            Self::HalfDay
        } else {
            Self::FullDay
        }
    }

    /// Classify a label such as "3 hours" or "2.5 hours".
    #[must_use]
    pub fn classify(label: &str) -> Option<Self> {
        label
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f32>().ok())
            .filter(|hours| hours.is_finite())
            .map(Self::from_hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupSizeBucket {
    Intimate,
    Small,
    Large,
}

impl GroupSizeBucket {
    pub const ALL: [Self; 3] = [Self::Intimate, Self::Small, Self::Large];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intimate => "Intimate (1-6 people)",
            Self::Small => "Small (7-12 people)",
            Self::Large => "Large (13+ people)",
        }
    }

    #[must_use]
    pub const fn from_capacity(capacity: u32) -> Self {
        if capacity <= INTIMATE_GROUP_MAX {
            Self::Intimate
        } else if capacity <= SMALL_GROUP_MAX {
            Self::Small
        } else {
            Self::Large
        }
    }

    /// Classify a label such as "Max 12" or "Up to 100" by its last number.
    #[must_use]
    pub fn classify(label: &str) -> Option<Self> {
        label
            .split_whitespace()
            .filter_map(|token| token.parse::<u32>().ok())
            .last()
            .map(Self::from_capacity)
    }
}

/// Selections in the filter panel. Empty sets place no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub categories: BTreeSet<Category>,
    pub difficulties: BTreeSet<Difficulty>,
    /// Whole-dollar bounds; an upper bound at the slider maximum means "and above"
    price_range: (u32, u32),
    pub durations: BTreeSet<DurationBucket>,
    pub group_sizes: BTreeSet<GroupSizeBucket>,
    #[serde(skip, default = "default_price_max")]
    price_max: u32,
    #[serde(skip, default = "default_price_step")]
    price_step: u32,
}

const fn default_price_max() -> u32 {
    PRICE_RANGE_MAX
}

const fn default_price_step() -> u32 {
    PRICE_RANGE_STEP
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_limits(PRICE_RANGE_MAX, PRICE_RANGE_STEP)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, checked: bool) {
    if checked {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

impl FilterState {
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_limits(config.price_range_max, config.price_range_step)
    }

    #[must_use]
    pub fn with_limits(price_max: u32, price_step: u32) -> Self {
        Self {
            categories: BTreeSet::new(),
            difficulties: BTreeSet::new(),
            price_range: (0, price_max),
            durations: BTreeSet::new(),
            group_sizes: BTreeSet::new(),
            price_max,
            price_step: price_step.max(1),
        }
    }

    #[must_use]
    pub const fn price_range(&self) -> (u32, u32) {
        self.price_range
    }

    pub fn toggle_category(&mut self, category: Category, checked: bool) {
        toggle(&mut self.categories, category, checked);
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty, checked: bool) {
        toggle(&mut self.difficulties, difficulty, checked);
    }

    pub fn toggle_duration(&mut self, bucket: DurationBucket, checked: bool) {
        toggle(&mut self.durations, bucket, checked);
    }

    pub fn toggle_group_size(&mut self, bucket: GroupSizeBucket, checked: bool) {
        toggle(&mut self.group_sizes, bucket, checked);
    }

    fn snap(&self, dollars: u32) -> u32 {
        let step = self.price_step;
        let snapped = dollars.saturating_add(step / 2) / step * step;
        snapped.min(self.price_max)
    }

    /// Set the slider bounds, snapping to the step and clamping to the
    /// slider range. Reversed bounds are swapped.
    pub fn set_price_range(&mut self, lower: u32, upper: u32) {
        let (lo, hi) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        self.price_range = (self.snap(lo), self.snap(hi));
    }

    #[must_use]
    pub const fn price_range_narrowed(&self) -> bool {
        self.price_range.0 > 0 || self.price_range.1 < self.price_max
    }

    /// Number of active selections, counting a narrowed price range as one.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.difficulties.len()
            + self.durations.len()
            + self.group_sizes.len()
            + usize::from(self.price_range_narrowed())
    }

    pub fn clear_all(&mut self) {
        *self = Self::with_limits(self.price_max, self.price_step);
    }

    fn admits_price(&self, price_cents: i64) -> bool {
        let (lower, upper) = self.price_range;
        let above_floor = price_cents >= i64::from(lower) * 100;
        let below_cap = upper >= self.price_max || price_cents <= i64::from(upper) * 100;
        above_floor && below_cap
    }

    #[must_use]
    pub fn matches(&self, tour: &Tour) -> bool {
        let category_ok = self.categories.is_empty() || self.categories.contains(&tour.category);
        let difficulty_ok =
            self.difficulties.is_empty() || self.difficulties.contains(&tour.difficulty);
        let duration_ok = self.durations.is_empty()
            || DurationBucket::classify(&tour.duration)
                .is_some_and(|bucket| self.durations.contains(&bucket));
        let group_ok = self.group_sizes.is_empty()
            || GroupSizeBucket::classify(&tour.group_size)
                .is_some_and(|bucket| self.group_sizes.contains(&bucket));
        category_ok && difficulty_ok && duration_ok && group_ok && self.admits_price(tour.price_cents)
    }

    /// Tours passing every panel filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, tours: impl IntoIterator<Item = &'a Tour>) -> Vec<&'a Tour> {
        tours.into_iter().filter(|tour| self.matches(tour)).collect()
    }
}
