//! Filters: city, rating-range and amenity selection over the table.
//!
//! Each filter is a set-intersection over rows; an empty city or amenity
//! selection places no constraint. [`cascade`] applies the filters in the
//! dashboard's order (city, then rating, then amenities) and reports the
//! options each later widget should offer given the earlier choices.

use crate::types::Listing;
use serde::Serialize;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Rating range
// ---------------------------------------------------------------------------

/// Inclusive rating interval. Rows with a missing rating never match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingRange {
    pub lo: f64,
    pub hi: f64,
}

impl RatingRange {
    /// Build a range, swapping the ends if they arrive reversed.
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    pub fn contains(&self, rating: Option<f64>) -> bool {
        rating.is_some_and(|r| self.lo <= r && r <= self.hi)
    }

    /// Min and max rating among `rows`, or `None` when no row has one.
    pub fn bounds_of<'a, I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        rows.into_iter()
            .filter_map(|l| l.rating)
            .fold(None, |acc: Option<Self>, r| {
                Some(match acc {
                    None => Self { lo: r, hi: r },
                    Some(b) => Self { lo: b.lo.min(r), hi: b.hi.max(r) },
                })
            })
    }
}

// ---------------------------------------------------------------------------
// FilterSet
// ---------------------------------------------------------------------------

/// The user's current filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Cities to keep. Empty keeps every row.
    pub cities: BTreeSet<String>,
    /// Explicit rating range. `None` means "the full span of the view".
    pub rating: Option<RatingRange>,
    /// Amenities every kept row must offer. Empty keeps every row.
    pub amenities: BTreeSet<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.rating.is_none() && self.amenities.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Add the city if absent, remove it if present.
    pub fn toggle_city(&mut self, city: &str) {
        toggle(&mut self.cities, city);
    }

    /// Add the amenity if absent, remove it if present.
    pub fn toggle_amenity(&mut self, amenity: &str) {
        toggle(&mut self.amenities, amenity);
    }

    pub fn matches_city(&self, listing: &Listing) -> bool {
        self.cities.is_empty()
            || listing
                .city
                .as_ref()
                .is_some_and(|c| self.cities.contains(c))
    }

    pub fn matches_rating(&self, listing: &Listing) -> bool {
        self.rating.is_none_or(|r| r.contains(listing.rating))
    }

    /// Every selected amenity must be present in the row.
    pub fn matches_amenities(&self, listing: &Listing) -> bool {
        listing.has_amenities(&self.amenities)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_city(listing)
            && self.matches_rating(listing)
            && self.matches_amenities(listing)
    }

    /// Rows matching every active filter, in input order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

fn toggle(set: &mut BTreeSet<String>, item: &str) {
    if !set.remove(item) {
        set.insert(item.to_string());
    }
}

// ---------------------------------------------------------------------------
// Option lists
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated cities of `rows`.
pub fn city_options<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Listing>,
{
    rows.into_iter()
        .filter_map(|l| l.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated amenities of `rows`.
pub fn amenity_options<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Listing>,
{
    rows.into_iter()
        .flat_map(|l| l.amenities_list.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

/// Result of applying the filters in dashboard order.
#[derive(Debug, Clone)]
pub struct Cascade<'a> {
    /// Rows that pass every filter.
    pub rows: Vec<&'a Listing>,
    /// Rating span of the city-filtered rows; the slider's limits.
    pub rating_bounds: Option<RatingRange>,
    /// The range actually applied (explicit or defaulted to the bounds).
    pub rating_applied: Option<RatingRange>,
    /// Amenities offered after the city and rating stages.
    pub amenity_options: Vec<String>,
}

/// Apply `filters` to `listings` in the order city → rating → amenities.
///
/// When the dataset has a rating column a range is always applied: the
/// explicit one if set, otherwise the full span of the city-filtered rows.
/// Either way rows without a rating drop out. If none of the city-filtered
/// rows has a rating and no explicit range is set, the stage is skipped.
pub fn cascade<'a>(listings: &'a [Listing], filters: &FilterSet, has_rating: bool) -> Cascade<'a> {
    let by_city: Vec<&Listing> = listings.iter().filter(|l| filters.matches_city(l)).collect();
    let rating_bounds = RatingRange::bounds_of(by_city.iter().copied());

    let rating_applied = if has_rating {
        filters.rating.or(rating_bounds)
    } else {
        None
    };
    let by_rating: Vec<&Listing> = match rating_applied {
        Some(range) => by_city.into_iter().filter(|l| range.contains(l.rating)).collect(),
        None => by_city,
    };

    let amenity_options = amenity_options(by_rating.iter().copied());
    let rows: Vec<&Listing> = by_rating
        .into_iter()
        .filter(|l| filters.matches_amenities(l))
        .collect();

    tracing::debug!(
        cities = filters.cities.len(),
        amenities = filters.amenities.len(),
        rating = ?rating_applied,
        rows = rows.len(),
        "filters applied"
    );

    Cascade {
        rows,
        rating_bounds,
        rating_applied,
        amenity_options,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
