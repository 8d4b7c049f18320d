//! Core types for stayboard-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! normalised [`Listing`] row and the [`NumericColumn`] discriminant used by
//! the stats layer to address typed columns generically.

use serde::Serialize;
use std::collections::BTreeMap;

/// One hotel record after normalisation.
///
/// Every parsed field is optional: `None` is the missing-value marker and is
/// never produced for a value that actually parsed. Rows are built once at
/// load time and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    /// Hotel name as it appeared in the source (`NAME`).
    pub hotel_name: Option<String>,
    /// Star rating, first decimal number found in `RATING`.
    pub rating: Option<f64>,
    /// Number of reviews behind the rating (`RATED BY`).
    pub rated_by: Option<i64>,
    pub base_cost: Option<f64>,
    pub final_cost: Option<f64>,
    pub room_size_sqft: Option<f64>,
    /// Raw address string, kept verbatim.
    pub address: Option<String>,
    /// City derived from `address`.
    pub city: Option<String>,
    /// Amenity names in source order. Empty when the source had none.
    pub amenities_list: Vec<String>,
    pub category: Option<String>,
    /// `base_cost - final_cost`.
    pub discount_value: Option<f64>,
    /// `discount_value / base_cost * 100`, rounded to two decimals.
    pub discount_pct: Option<f64>,
    /// Source keys that are not part of the recognised schema, untouched.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Listing {
    /// True when every amenity in `wanted` appears in this row's list.
    pub fn has_amenities<'a, I>(&self, wanted: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        wanted
            .into_iter()
            .all(|a| self.amenities_list.iter().any(|have| have == a))
    }
}

/// The numeric columns of a [`Listing`], in the order the correlation
/// heatmap lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Rating,
    RatedBy,
    BaseCost,
    FinalCost,
    DiscountValue,
    DiscountPct,
    RoomSizeSqft,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 7] = [
        NumericColumn::Rating,
        NumericColumn::RatedBy,
        NumericColumn::BaseCost,
        NumericColumn::FinalCost,
        NumericColumn::DiscountValue,
        NumericColumn::DiscountPct,
        NumericColumn::RoomSizeSqft,
    ];

    /// Read this column from a row as `f64`.
    pub fn get(self, listing: &Listing) -> Option<f64> {
        match self {
            NumericColumn::Rating => listing.rating,
            NumericColumn::RatedBy => listing.rated_by.map(|n| n as f64),
            NumericColumn::BaseCost => listing.base_cost,
            NumericColumn::FinalCost => listing.final_cost,
            NumericColumn::DiscountValue => listing.discount_value,
            NumericColumn::DiscountPct => listing.discount_pct,
            NumericColumn::RoomSizeSqft => listing.room_size_sqft,
        }
    }

    /// Short label used for heatmap axes.
    pub fn short_label(self) -> &'static str {
        match self {
            NumericColumn::Rating => "rate",
            NumericColumn::RatedBy => "revs",
            NumericColumn::BaseCost => "base",
            NumericColumn::FinalCost => "final",
            NumericColumn::DiscountValue => "disc",
            NumericColumn::DiscountPct => "disc%",
            NumericColumn::RoomSizeSqft => "sqft",
        }
    }
}

impl std::fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericColumn::Rating => write!(f, "rating"),
            NumericColumn::RatedBy => write!(f, "rated_by"),
            NumericColumn::BaseCost => write!(f, "base_cost"),
            NumericColumn::FinalCost => write!(f, "final_cost"),
            NumericColumn::DiscountValue => write!(f, "discount_value"),
            NumericColumn::DiscountPct => write!(f, "discount_pct"),
            NumericColumn::RoomSizeSqft => write!(f, "room_size_sqft"),
        }
    }
}
