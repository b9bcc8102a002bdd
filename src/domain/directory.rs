//! In-memory shop directory and the filter/sort query over it.

use super::geo::distance_meters;
use super::models::{Brand, Position, Shop};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Query input: which brands to keep and how far away shops may be.
///
/// An empty brand set matches every brand, and so does the full set.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub brands: BTreeSet<Brand>,
    pub max_distance_meters: Option<f64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            brands: Brand::ALL.into_iter().collect(),
            max_distance_meters: None,
        }
    }
}

impl FilterCriteria {
    pub fn new(brands: impl IntoIterator<Item = Brand>, max_distance_meters: Option<f64>) -> Self {
        Self {
            brands: brands.into_iter().collect(),
            max_distance_meters,
        }
    }

    fn matches_brand(&self, brand: Brand) -> bool {
        self.brands.is_empty() || self.brands.contains(&brand)
    }
}

/// Filters `shops` by `criteria` and orders them by proximity to `position`.
///
/// The distance bound only applies when both a position and a maximum are
/// given. With a position the result is sorted nearest first and equidistant
/// shops keep their input order; without one the input order is kept.
///
/// # Examples
///
/// ```
/// use coffeefinder::domain::{query, Brand, FilterCriteria, Shop};
///
/// let shops = Shop::sample_shops();
/// let criteria = FilterCriteria::new([Brand::Dunkin], None);
/// let found = query(&shops, &criteria, None);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].brand, Brand::Dunkin);
/// ```
pub fn query(shops: &[Shop], criteria: &FilterCriteria, position: Option<Position>) -> Vec<Shop> {
    let mut matched: Vec<(f64, &Shop)> = shops
        .iter()
        .filter(|shop| criteria.matches_brand(shop.brand))
        .map(|shop| {
            let distance = position
                .map(|p| distance_meters(p, shop.position()))
                .unwrap_or(0.0);
            (distance, shop)
        })
        .filter(|(distance, _)| match (position, criteria.max_distance_meters) {
            (Some(_), Some(max)) => *distance <= max,
            _ => true,
        })
        .collect();

    if position.is_some() {
        // sort_by is stable, so ties keep input order.
        matched.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    matched.into_iter().map(|(_, shop)| shop.clone()).collect()
}

/// The backing collection of known shops.
#[derive(Debug, Clone)]
pub struct ShopDirectory {
    shops: Vec<Shop>,
}

impl Default for ShopDirectory {
    fn default() -> Self {
        Self::with_sample_shops()
    }
}

impl ShopDirectory {
    pub fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    pub fn with_sample_shops() -> Self {
        Self::new(Shop::sample_shops())
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn get(&self, id: Uuid) -> Option<&Shop> {
        self.shops.iter().find(|shop| shop.id == id)
    }

    pub fn query(&self, criteria: &FilterCriteria, position: Option<Position>) -> Vec<Shop> {
        query(&self.shops, criteria, position)
    }

    /// Appends a shop as-is. No deduplication or validation.
    pub fn add(&mut self, shop: Shop) {
        self.shops.push(shop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MILES: f64 = 16093.4;

    fn downtown_la() -> Position {
        Position::new(34.052235, -118.243683)
    }

    fn any_brand() -> BTreeSet<Brand> {
        BTreeSet::new()
    }

    fn names(shops: &[Shop]) -> Vec<&str> {
        shops.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_ten_mile_scenario_returns_nearest_first() {
        let shops = Shop::sample_shops();
        let criteria = FilterCriteria::new(Brand::ALL, Some(TEN_MILES));
        let found = query(&shops, &criteria, Some(downtown_la()));

        assert_eq!(
            names(&found),
            vec![
                "Starbucks - Main St",
                "Dutch Bros - Downtown",
                "Dunkin' - City Center",
            ]
        );
    }

    #[test]
    fn test_full_or_empty_brand_set_is_noop() {
        let shops = Shop::sample_shops();
        let full = query(&shops, &FilterCriteria::new(Brand::ALL, None), None);
        let empty = query(&shops, &FilterCriteria::new(any_brand(), None), None);

        assert_eq!(full, shops);
        assert_eq!(empty, shops);
    }

    #[test]
    fn test_empty_brand_set_with_distance_bound() {
        let shops = Shop::sample_shops();
        let found = query(
            &shops,
            &FilterCriteria::new(any_brand(), Some(TEN_MILES)),
            Some(downtown_la()),
        );
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_every_proper_brand_subset_filters_other_brands() {
        let shops = Shop::sample_shops();
        // Bit masks 1..7 cover the six proper non-empty subsets of three brands.
        for mask in 1..(1u32 << Brand::ALL.len()) - 1 {
            let brands: BTreeSet<Brand> = Brand::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, brand)| brand)
                .collect();
            let expected = shops.iter().filter(|s| brands.contains(&s.brand)).count();

            let criteria = FilterCriteria::new(brands.clone(), None);
            let found = query(&shops, &criteria, None);

            assert_eq!(found.len(), expected, "brands {:?}", brands);
            assert!(found.iter().all(|s| brands.contains(&s.brand)), "brands {:?}", brands);
        }
    }

    #[test]
    fn test_distance_bound_holds_for_every_result() {
        let shops = Shop::sample_shops();
        let origin = Position::new(33.9, -118.0);
        for max in [1609.34, 8046.72, 32186.9, 100_000.0, 1_000_000.0] {
            let found = query(&shops, &FilterCriteria::new(any_brand(), Some(max)), Some(origin));
            for shop in &found {
                assert!(distance_meters(origin, shop.position()) <= max + 1e-6);
            }
        }
    }

    #[test]
    fn test_shop_at_position_included_for_zero_threshold() {
        let shops = Shop::sample_shops();
        let found = query(&shops, &FilterCriteria::new(any_brand(), Some(0.0)), Some(downtown_la()));
        assert_eq!(names(&found), vec!["Starbucks - Main St"]);
    }

    #[test]
    fn test_distance_ignored_without_position() {
        let shops = Shop::sample_shops();
        let found = query(&shops, &FilterCriteria::new(any_brand(), Some(1.0)), None);
        assert_eq!(found, shops);
    }

    #[test]
    fn test_position_without_threshold_sorts_everything() {
        let shops = Shop::sample_shops();
        let phoenix = Position::new(33.448376, -112.074036);
        let found = query(&shops, &FilterCriteria::default(), Some(phoenix));

        assert_eq!(found.len(), 5);
        assert_eq!(found[0].name, "Starbucks - Riverwalk");
        let distances: Vec<f64> = found
            .iter()
            .map(|s| distance_meters(phoenix, s.position()))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_equidistant_shops_keep_input_order() {
        let spot = Position::new(40.0, -100.0);
        let shops = vec![
            Shop::new("Far", Brand::Dunkin, 41.0, -100.0, None),
            Shop::new("Twin A", Brand::Starbucks, 40.0, -100.0, None),
            Shop::new("Twin B", Brand::DutchBros, 40.0, -100.0, None),
            Shop::new("Twin C", Brand::Starbucks, 40.0, -100.0, None),
        ];
        let found = query(&shops, &FilterCriteria::default(), Some(spot));
        assert_eq!(names(&found), vec!["Twin A", "Twin B", "Twin C", "Far"]);
    }

    #[test]
    fn test_empty_inputs_never_fail() {
        assert!(query(&[], &FilterCriteria::new(any_brand(), None), None).is_empty());
        assert!(query(&[], &FilterCriteria::default(), Some(downtown_la())).is_empty());
        assert!(query(&[], &FilterCriteria::new(any_brand(), Some(10.0)), Some(downtown_la())).is_empty());
    }

    #[test]
    fn test_directory_add_appends_without_dedup() {
        let mut directory = ShopDirectory::with_sample_shops();
        let shop = Shop::new("Pop-up", Brand::Dunkin, 34.0, -118.0, None);
        directory.add(shop.clone());
        directory.add(shop.clone());

        assert_eq!(directory.shops().len(), 7);
        assert_eq!(directory.shops()[5], shop);
        assert_eq!(directory.shops()[6], shop);
        assert_eq!(directory.get(shop.id), Some(&shop));
    }

    #[test]
    fn test_directory_query_matches_free_function() {
        let directory = ShopDirectory::default();
        let criteria = FilterCriteria::new([Brand::DutchBros], Some(TEN_MILES));
        assert_eq!(
            directory.query(&criteria, Some(downtown_la())),
            query(directory.shops(), &criteria, Some(downtown_la()))
        );
    }
}
