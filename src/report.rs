//! Headless report: the dashboard's aggregates as one JSON document.
//!
//! The report goes through the same filter cascade as the TUI, so with no
//! filters it describes exactly what the dashboard shows on start-up.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stayboard_core::{
    config::ChartsConfig, stats::DashboardStats, FilterSet, ListingTable, RatingRange,
};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: Option<&'a Path>,
    pub loaded_at: DateTime<Utc>,
    /// Source columns present in the dataset, by internal name.
    pub columns: Vec<&'static str>,
    pub total_rows: usize,
    pub visible_rows: usize,
    pub filters: AppliedFilters<'a>,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

/// The filters as the cascade applied them.
#[derive(Debug, Serialize)]
pub struct AppliedFilters<'a> {
    pub cities: &'a BTreeSet<String>,
    pub rating: Option<RatingRange>,
    pub rating_bounds: Option<RatingRange>,
    pub amenities: &'a BTreeSet<String>,
}

/// Build the report for `table` under `filters`.
pub fn build<'a>(
    table: &'a ListingTable,
    filters: &'a FilterSet,
    charts: &ChartsConfig,
) -> Report<'a> {
    let cascade = table.cascade(filters);
    let stats = DashboardStats::compute(&cascade.rows, charts);
    tracing::debug!(
        total = table.len(),
        visible = cascade.rows.len(),
        "report built"
    );
    Report {
        source: table.source(),
        loaded_at: table.loaded_at(),
        columns: table.columns().names(),
        total_rows: table.len(),
        visible_rows: cascade.rows.len(),
        filters: AppliedFilters {
            cities: &filters.cities,
            rating: cascade.rating_applied,
            rating_bounds: cascade.rating_bounds,
            amenities: &filters.amenities,
        },
        stats,
    }
}

/// Pretty-printed JSON for `report`.
pub fn to_json(report: &Report<'_>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
