//! Normalizer: turns raw dataset records into typed [`Listing`] rows.
//!
//! Source keys are matched case-sensitively against a static rename map;
//! recognised fields go through their parser in [`crate::parse`], everything
//! else is carried through untouched in [`Listing::extra`]. The discount
//! columns are derived last, from the cleaned prices.

use crate::parse;
use crate::table::{ColumnSet, ListingTable};
use crate::types::Listing;
use phf::phf_map;
use serde_json::{Map, Value};

/// Raw record as read from the dataset: one JSON object.
pub type RawRecord = Map<String, Value>;

/// Recognised source columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceField {
    Name,
    Rating,
    RatedBy,
    BaseCost,
    FinalCost,
    RoomSize,
    Amenities,
    Address,
    Category,
}

/// Source key → field. Keys are matched exactly; `"rating"` is not `"RATING"`.
pub static SOURCE_FIELDS: phf::Map<&'static str, SourceField> = phf_map! {
    "NAME" => SourceField::Name,
    "RATING" => SourceField::Rating,
    "RATED BY" => SourceField::RatedBy,
    "BASE_COST" => SourceField::BaseCost,
    "FINAL_COST" => SourceField::FinalCost,
    "ROOM SIZE" => SourceField::RoomSize,
    "AMENITYS" => SourceField::Amenities,
    "ADDRESS" => SourceField::Address,
    "CATEGORY" => SourceField::Category,
};

impl SourceField {
    /// Internal column name after renaming.
    pub fn column_name(self) -> &'static str {
        match self {
            SourceField::Name => "hotel_name",
            SourceField::Rating => "rating",
            SourceField::RatedBy => "rated_by",
            SourceField::BaseCost => "base_cost",
            SourceField::FinalCost => "final_cost",
            SourceField::RoomSize => "room_size",
            SourceField::Amenities => "amenities",
            SourceField::Address => "address",
            SourceField::Category => "category",
        }
    }
}

/// Normalise every record into a [`ListingTable`].
///
/// The set of columns present is the union of keys over all records, the
/// same way a data frame built from heterogeneous objects would see it.
pub fn normalize_records(records: Vec<RawRecord>) -> ListingTable {
    let mut columns = ColumnSet::default();
    let listings: Vec<Listing> = records
        .iter()
        .map(|record| {
            for key in record.keys() {
                if let Some(field) = SOURCE_FIELDS.get(key.as_str()) {
                    columns.insert(*field);
                }
            }
            normalize_record(record)
        })
        .collect();

    log_missing_counts(&listings, &columns);
    ListingTable::new(listings, columns)
}

/// Normalise a single record. Total: never fails, whatever the input holds.
pub fn normalize_record(record: &RawRecord) -> Listing {
    let mut listing = Listing::default();

    for (key, value) in record {
        match SOURCE_FIELDS.get(key.as_str()) {
            Some(SourceField::Name) => listing.hotel_name = parse::parse_text(value),
            Some(SourceField::Rating) => listing.rating = parse::parse_rating(value),
            Some(SourceField::RatedBy) => listing.rated_by = parse::parse_count(value),
            Some(SourceField::BaseCost) => listing.base_cost = parse::parse_currency(value),
            Some(SourceField::FinalCost) => listing.final_cost = parse::parse_currency(value),
            Some(SourceField::RoomSize) => listing.room_size_sqft = parse::parse_room_size(value),
            Some(SourceField::Amenities) => listing.amenities_list = parse::split_amenities(value),
            Some(SourceField::Address) => {
                listing.address = parse::parse_text(value);
                listing.city = parse::extract_city(value);
            }
            Some(SourceField::Category) => listing.category = parse::parse_text(value),
            None => {
                listing.extra.insert(key.clone(), value.clone());
            }
        }
    }

    let (value, pct) = derive_discount(listing.base_cost, listing.final_cost);
    listing.discount_value = value;
    listing.discount_pct = pct;
    listing
}

/// Discount value and percentage from cleaned prices.
///
/// Either price missing → both missing. A zero base cost still yields a
/// value but no percentage.
pub fn derive_discount(base: Option<f64>, fin: Option<f64>) -> (Option<f64>, Option<f64>) {
    let (Some(base), Some(fin)) = (base, fin) else {
        return (None, None);
    };
    let value = base - fin;
    let pct = if base == 0.0 {
        None
    } else {
        Some(round_to(value / base * 100.0, 2))
    };
    (Some(value), pct)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

fn log_missing_counts(listings: &[Listing], columns: &ColumnSet) {
    let missing = |f: fn(&Listing) -> bool| listings.iter().filter(|l| f(*l)).count();
    tracing::debug!(
        rows = listings.len(),
        columns = ?columns.names(),
        rating_missing = missing(|l| l.rating.is_none()),
        rated_by_missing = missing(|l| l.rated_by.is_none()),
        base_cost_missing = missing(|l| l.base_cost.is_none()),
        final_cost_missing = missing(|l| l.final_cost.is_none()),
        city_missing = missing(|l| l.city.is_none()),
        "normalised listings"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
