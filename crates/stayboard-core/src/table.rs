//! Table: the normalised rows plus which source columns existed at all.
//!
//! The table is the single source of truth; filters produce borrowed views
//! over it and never touch the rows themselves.

use crate::filter::{self, Cascade, FilterSet};
use crate::normalize::SourceField;
use crate::types::Listing;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Source columns seen in the dataset.
///
/// A dataset without `RATING` has no rating slider; without `AMENITYS`
/// there is nothing to pick in the amenity list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<SourceField>);

impl ColumnSet {
    pub fn insert(&mut self, field: SourceField) {
        self.0.insert(field);
    }

    pub fn contains(&self, field: SourceField) -> bool {
        self.0.contains(&field)
    }

    /// Internal names of the columns present, in schema order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|f| f.column_name()).collect()
    }
}

impl FromIterator<SourceField> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = SourceField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All listings loaded from one dataset.
#[derive(Debug, Clone)]
pub struct ListingTable {
    listings: Vec<Listing>,
    columns: ColumnSet,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl ListingTable {
    pub fn new(listings: Vec<Listing>, columns: ColumnSet) -> Self {
        Self {
            listings,
            columns,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Record the file the table was loaded from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Rows passing `filters` in dashboard order, with the slider bounds and
    /// amenity options seen along the way.
    pub fn cascade(&self, filters: &FilterSet) -> Cascade<'_> {
        filter::cascade(&self.listings, filters, self.columns.contains(SourceField::Rating))
    }
}
