//! Test builders: ergonomic constructors for raw records and listings.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{Map, Value};
use stayboard_core::{normalize::RawRecord, Listing};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a raw dataset record, keyed by source column name.
///
/// ```rust
/// let record = RecordBuilder::new()
///     .name("Blue Inn")
///     .rating("4.5 stars")
///     .address("MG Road, Pune")
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn name(self, v: &str) -> Self {
        self.field("NAME", v)
    }

    pub fn rating(self, v: &str) -> Self {
        self.field("RATING", v)
    }

    pub fn rated_by(self, v: &str) -> Self {
        self.field("RATED BY", v)
    }

    pub fn base_cost(self, v: &str) -> Self {
        self.field("BASE_COST", v)
    }

    pub fn final_cost(self, v: &str) -> Self {
        self.field("FINAL_COST", v)
    }

    pub fn room_size(self, v: &str) -> Self {
        self.field("ROOM SIZE", v)
    }

    pub fn amenities(self, v: &str) -> Self {
        self.field("AMENITYS", v)
    }

    pub fn address(self, v: &str) -> Self {
        self.field("ADDRESS", v)
    }

    pub fn category(self, v: &str) -> Self {
        self.field("CATEGORY", v)
    }

    pub fn build(self) -> RawRecord {
        self.fields
    }
}

// ---------------------------------------------------------------------------
// ListingBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for already-normalised [`Listing`]s, for filter and stats
/// tests that do not care about parsing.
#[derive(Default)]
pub struct ListingBuilder {
    listing: Listing,
}

impl ListingBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            listing: Listing {
                hotel_name: Some(name.to_string()),
                ..Listing::default()
            },
        }
    }

    pub fn city(mut self, city: &str) -> Self {
        self.listing.city = Some(city.to_string());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.listing.rating = Some(rating);
        self
    }

    pub fn costs(mut self, base: f64, fin: f64) -> Self {
        self.listing.base_cost = Some(base);
        self.listing.final_cost = Some(fin);
        let (value, pct) = stayboard_core::normalize::derive_discount(Some(base), Some(fin));
        self.listing.discount_value = value;
        self.listing.discount_pct = pct;
        self
    }

    pub fn amenities(mut self, items: &[&str]) -> Self {
        self.listing.amenities_list = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.listing.category = Some(category.to_string());
        self
    }

    pub fn build(self) -> Listing {
        self.listing
    }
}
