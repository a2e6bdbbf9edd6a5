//! Tour catalog, search filters, and sort orders
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::FILTER_ALL;
use crate::error::DataError;
use crate::numbers::format_cents_compact;

const DEFAULT_TOUR_DATA: &str = include_str!("../assets/data/tours.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Moderate, Self::Challenging];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "challenging" => Ok(Self::Challenging),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Adventure,
    Hiking,
    #[serde(rename = "Food & Culture")]
    FoodAndCulture,
    #[serde(rename = "Water Sports")]
    WaterSports,
    Photography,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Adventure,
        Self::Hiking,
        Self::FoodAndCulture,
        Self::WaterSports,
        Self::Photography,
    ];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adventure => "Adventure",
            Self::Hiking => "Hiking",
            Self::FoodAndCulture => "Food & Culture",
            Self::WaterSports => "Water Sports",
            Self::Photography => "Photography",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::Hiking => "hiking",
            Self::FoodAndCulture => "food-culture",
            Self::WaterSports => "water-sports",
            Self::Photography => "photography",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Accepts either the display label or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s || c.slug() == s)
            .ok_or(())
    }
}

/// Exact-match filter with an "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(FILTER_ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == FILTER_ALL {
            Ok(Self::All)
        } else {
            T::from_str(s).map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Popular, Self::PriceLow, Self::PriceHigh];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::PriceLow => "Price: Low",
            Self::PriceHigh => "Price: High",
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourBadge {
    Featured,
    Popular,
}

impl TourBadge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Popular => "Popular",
        }
    }
}

/// A bookable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub title: String,
    pub location: String,
    pub image: String,
    /// Price in cents to avoid floating-point issues
    pub price_cents: i64,
    /// Crossed-out price shown next to a discounted price
    #[serde(default)]
    pub original_price_cents: Option<i64>,
    pub duration: String,
    pub group_size: String,
    pub category: Category,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub featured: bool,
}

impl Tour {
    /// Case-insensitive substring match on title or location.
    /// `needle` must already be lowercased.
    fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.location.to_lowercase().contains(needle)
    }

    #[must_use]
    pub fn discount_cents(&self) -> Option<i64> {
        self.original_price_cents
            .map(|original| original - self.price_cents)
            .filter(|saved| *saved > 0)
    }

    /// Card price, e.g. "$25".
    #[must_use]
    pub fn price_label(&self) -> String {
        format_cents_compact(self.price_cents)
    }

    #[must_use]
    pub fn original_price_label(&self) -> Option<String> {
        self.discount_cents()
            .and(self.original_price_cents)
            .map(format_cents_compact)
    }

    #[must_use]
    pub fn badges(&self) -> SmallVec<[TourBadge; 2]> {
        let mut badges = SmallVec::new();
        if self.featured {
            badges.push(TourBadge::Featured);
        }
        if self.popular {
            badges.push(TourBadge::Popular);
        }
        badges
    }

    /// Highlights shown on a catalog card.
    #[must_use]
    pub fn preview_highlights(&self) -> &[String] {
        &self.highlights[..self.highlights.len().min(2)]
    }
}

/// Search string, filters, and sort order for a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TourQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Filter<Category>,
    #[serde(default)]
    pub difficulty: Filter<Difficulty>,
    #[serde(default)]
    pub sort: SortKey,
}

impl TourQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: Filter<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Filter<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Reset search and filters; the sort order is kept.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.category = Filter::All;
        self.difficulty = Filter::All;
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    tours: Vec<Tour>,
}

/// Immutable list of tours in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    tours: Vec<Tour>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicateTour`] when two tours share an id.
    pub fn new(tours: Vec<Tour>) -> Result<Self, DataError> {
        let mut seen = HashSet::with_capacity(tours.len());
        for tour in &tours {
            if !seen.insert(tour.id.as_str()) {
                return Err(DataError::DuplicateTour(tour.id.clone()));
            }
        }
        Ok(Self { tours })
    }

    /// Load a catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or contains duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|source| DataError::Parse {
            asset: "tours.json",
            source,
        })?;
        Self::new(file.tours)
    }

    /// Load the compiled-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_TOUR_DATA)
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Tour> {
        self.tours.iter().find(|tour| tour.id == id)
    }

    /// Filter and sort the catalog. Sorting is stable, so ties keep catalog order.
    #[must_use]
    pub fn query(&self, query: &TourQuery) -> Vec<&Tour> {
        let needle = query.search.to_lowercase();
        let mut matches: Vec<&Tour> = self
            .tours
            .iter()
            .filter(|tour| {
                tour.matches_search(&needle)
                    && query.category.admits(&tour.category)
                    && query.difficulty.admits(&tour.difficulty)
            })
            .collect();

        match query.sort {
            SortKey::Popular => matches.sort_by_key(|tour| Reverse(tour.popular)),
            SortKey::PriceLow => matches.sort_by_key(|tour| tour.price_cents),
            SortKey::PriceHigh => matches.sort_by_key(|tour| Reverse(tour.price_cents)),
        }
        log::debug!(
            "catalog query | search:{:?} category:{} difficulty:{} sort:{} -> {}",
            query.search,
            query.category,
            query.difficulty,
            query.sort.as_str(),
            matches.len()
        );
        matches
    }

    /// Category options for a filter dropdown, "all" first.
    #[must_use]
    pub fn categories() -> Vec<Filter<Category>> {
        std::iter::once(Filter::All)
            .chain(Category::ALL.into_iter().map(Filter::Only))
            .collect()
    }

    /// Difficulty options for a filter dropdown, "all" first.
    #[must_use]
    pub fn difficulties() -> Vec<Filter<Difficulty>> {
        std::iter::once(Filter::All)
            .chain(Difficulty::ALL.into_iter().map(Filter::Only))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.tours.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// "1 tour found", "3 tours found".
#[must_use]
pub fn result_count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} tour{plural} found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::load_from_static().unwrap()
    }

    fn ids(tours: &[&Tour]) -> Vec<String> {
        tours.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn embedded_catalog_loads_six_tours() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        let cycling = catalog.find("1").unwrap();
        assert_eq!(cycling.price_cents, 2500);
        assert_eq!(cycling.discount_cents(), Some(1000));
        assert_eq!(cycling.price_label(), "$25");
        assert_eq!(cycling.original_price_label().as_deref(), Some("$35"));
        assert_eq!(cycling.category, Category::Adventure);
    }

    #[test]
    fn kayak_search_finds_single_tour() {
        let catalog = catalog();
        let query = TourQuery::new().with_search("kayak");
        let results = catalog.query(&query);
        assert_eq!(ids(&results), vec!["4"]);
    }

    #[test]
    fn search_is_case_insensitive_over_location() {
        let catalog = catalog();
        let results = catalog.query(&TourQuery::new().with_search("HISTORIC"));
        assert_eq!(ids(&results), vec!["1", "3"]);
    }

    #[test]
    fn price_low_sorts_ascending_with_stable_ties() {
        let catalog = catalog();
        let results = catalog.query(&TourQuery::new().with_sort(SortKey::PriceLow));
        assert_eq!(ids(&results), vec!["1", "5", "3", "2", "4", "6"]);
        let prices: Vec<i64> = results.iter().map(|t| t.price_cents).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn price_high_sorts_descending() {
        let catalog = catalog();
        let results = catalog.query(&TourQuery::new().with_sort(SortKey::PriceHigh));
        assert_eq!(ids(&results), vec!["6", "4", "2", "3", "5", "1"]);
    }

    #[test]
    fn popular_sort_moves_popular_first_and_keeps_order() {
        let tours = vec![
            tour("a", 100, false),
            tour("b", 100, true),
            tour("c", 100, false),
            tour("d", 100, true),
        ];
        let catalog = Catalog::new(tours).unwrap();
        let results = catalog.query(&TourQuery::new());
        assert_eq!(ids(&results), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn category_and_difficulty_filters_combine() {
        let catalog = catalog();
        let query = TourQuery::new()
            .with_category(Filter::Only(Category::FoodAndCulture))
            .with_difficulty(Filter::Only(Difficulty::Easy));
        assert_eq!(ids(&catalog.query(&query)), vec!["3", "6"]);

        let none = TourQuery::new()
            .with_category(Filter::Only(Category::Hiking))
            .with_difficulty(Filter::Only(Difficulty::Easy));
        assert!(catalog.query(&none).is_empty());
    }

    #[test]
    fn clear_filters_keeps_sort() {
        let mut query = TourQuery::new()
            .with_search("zzz")
            .with_category(Filter::Only(Category::Hiking))
            .with_sort(SortKey::PriceHigh);
        query.clear_filters();
        assert_eq!(query, TourQuery::new().with_sort(SortKey::PriceHigh));
    }

    #[test]
    fn parses_filter_and_sort_tokens() {
        assert_eq!("all".parse::<Filter<Category>>(), Ok(Filter::All));
        assert_eq!(
            "Food & Culture".parse::<Filter<Category>>(),
            Ok(Filter::Only(Category::FoodAndCulture))
        );
        assert_eq!("water-sports".parse::<Category>(), Ok(Category::WaterSports));
        assert_eq!(
            "Moderate".parse::<Filter<Difficulty>>(),
            Ok(Filter::Only(Difficulty::Moderate))
        );
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceLow));
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![tour("x", 1, false), tour("x", 2, false)]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateTour(id) if id == "x"));
    }

    #[test]
    fn badges_and_labels() {
        let catalog = catalog();
        let cycling = catalog.find("1").unwrap();
        assert_eq!(
            cycling.badges().as_slice(),
            &[TourBadge::Featured, TourBadge::Popular]
        );
        assert_eq!(cycling.preview_highlights().len(), 2);
        assert_eq!(result_count_label(1), "1 tour found");
        assert_eq!(result_count_label(0), "0 tours found");
        assert_eq!(Catalog::categories().len(), 6);
        assert_eq!(Catalog::difficulties()[0], Filter::All);
    }

    fn tour(id: &str, price_cents: i64, popular: bool) -> Tour {
        Tour {
            id: id.to_string(),
            title: format!("Tour {id}"),
            location: "Somewhere".to_string(),
            image: String::new(),
            price_cents,
            original_price_cents: None,
            duration: "2 hours".to_string(),
            group_size: "Max 4".to_string(),
            category: Category::Adventure,
            difficulty: Difficulty::Easy,
            highlights: Vec::new(),
            popular,
            featured: false,
        }
    }
}
