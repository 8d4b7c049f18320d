//! Stats: the aggregates behind every dashboard chart.
//!
//! All functions take a filtered view (`&[&Listing]`) and skip missing values
//! column by column.

use crate::config::ChartsConfig;
use crate::normalize::round_to;
use crate::types::{Listing, NumericColumn};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Label substituted for a missing category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Headline numbers shown above the overview charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub hotels: usize,
    /// Mean rating, 2 decimals.
    pub avg_rating: Option<f64>,
    /// Mean final price, whole currency units.
    pub avg_final_cost: Option<f64>,
    /// Median discount percentage, 1 decimal.
    pub median_discount_pct: Option<f64>,
}

/// One histogram bin; `[lo, hi)` except the last, which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: usize,
}

/// A labelled bar in a ranked chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBar {
    pub label: String,
    pub value: f64,
}

/// Pairwise Pearson correlations; `values[i][j]` pairs `columns[i]` with `columns[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// Data for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub kpis: Kpis,
    pub rating_histogram: Vec<Bin>,
    pub base_cost_box: Option<BoxSummary>,
    pub final_cost_box: Option<BoxSummary>,
    pub discount_histogram: Vec<Bin>,
    pub top_hotels: Vec<RankedBar>,
}

/// Data for the deep-dive page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepDive {
    pub top_cities: Vec<RankedBar>,
    pub categories: Vec<RankedBar>,
    pub amenities: Vec<RankedBar>,
    pub correlation: CorrelationMatrix,
}

/// Everything both pages render, computed in one pass over a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub overview: Overview,
    pub deep_dive: DeepDive,
}

impl DashboardStats {
    pub fn compute(rows: &[&Listing], charts: &ChartsConfig) -> Self {
        Self {
            overview: Overview {
                kpis: kpis(rows),
                rating_histogram: histogram(
                    &column(rows, NumericColumn::Rating),
                    charts.rating_bins,
                ),
                base_cost_box: box_summary(&column(rows, NumericColumn::BaseCost)),
                final_cost_box: box_summary(&column(rows, NumericColumn::FinalCost)),
                discount_histogram: histogram(
                    &column(rows, NumericColumn::DiscountPct),
                    charts.discount_bins,
                ),
                top_hotels: top_hotels_by_rating(rows, charts.top_hotels),
            },
            deep_dive: DeepDive {
                top_cities: top_cities(rows, charts.top_cities),
                categories: category_counts(rows),
                amenities: amenity_frequency(rows, charts.top_amenities),
                correlation: correlation_matrix(rows, &NumericColumn::ALL),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

/// Non-missing values of one numeric column, in row order.
pub fn column(rows: &[&Listing], col: NumericColumn) -> Vec<f64> {
    rows.iter().filter_map(|l| col.get(l)).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(&sorted(values), 0.5)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linear-interpolation quantile of already sorted values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = last as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

pub fn kpis(rows: &[&Listing]) -> Kpis {
    Kpis {
        hotels: rows.len(),
        avg_rating: mean(&column(rows, NumericColumn::Rating)).map(|m| round_to(m, 2)),
        avg_final_cost: mean(&column(rows, NumericColumn::FinalCost)).map(|m| round_to(m, 0)),
        median_discount_pct: median(&column(rows, NumericColumn::DiscountPct))
            .map(|m| round_to(m, 1)),
    }
}

/// Equal-width bins spanning `[min, max]`. A constant column is one bin.
pub fn histogram(values: &[f64], nbins: usize) -> Vec<Bin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if nbins == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![Bin { lo: min, hi: max, count: values.len() }];
    }

    let width = (max - min) / nbins as f64;
    let mut bins: Vec<Bin> = (0..nbins)
        .map(|i| Bin {
            lo: min + width * i as f64,
            hi: if i + 1 == nbins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(nbins - 1);
        bins[idx].count += 1;
    }
    bins
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let s = sorted(values);
    let q1 = quantile(&s, 0.25)?;
    let median = quantile(&s, 0.5)?;
    let q3 = quantile(&s, 0.75)?;
    let iqr = q3 - q1;
    let (fence_lo, fence_hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside: Vec<f64> = s
        .iter()
        .copied()
        .filter(|v| *v >= fence_lo && *v <= fence_hi)
        .collect();
    Some(BoxSummary {
        n: s.len(),
        min: s[0],
        q1,
        median,
        q3,
        max: s[s.len() - 1],
        lower_whisker: inside.first().copied().unwrap_or(q1),
        upper_whisker: inside.last().copied().unwrap_or(q3),
        outliers: s.len() - inside.len(),
    })
}

/// Mean rating per hotel name, the `n` highest. Ties go to the name that
/// sorts first.
pub fn top_hotels_by_rating(rows: &[&Listing], n: usize) -> Vec<RankedBar> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for row in rows {
        let Some(name) = row.hotel_name.as_deref() else {
            continue;
        };
        let (sum, count) = groups.entry(name).or_insert((0.0, 0));
        if let Some(r) = row.rating {
            *sum += r;
            *count += 1;
        }
    }

    let bars = groups
        .into_iter()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(label, (sum, count))| RankedBar {
            label: label.to_string(),
            value: sum / count as f64,
        })
        .collect();
    largest(bars, n)
}

pub fn top_cities(rows: &[&Listing], n: usize) -> Vec<RankedBar> {
    largest(value_counts(rows.iter().filter_map(|l| l.city.as_deref())), n)
}

/// Every category with its row count; missing categories count as "Unknown".
pub fn category_counts(rows: &[&Listing]) -> Vec<RankedBar> {
    let counts = value_counts(
        rows.iter()
            .map(|l| l.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)),
    );
    largest(counts, usize::MAX)
}

pub fn amenity_frequency(rows: &[&Listing], n: usize) -> Vec<RankedBar> {
    let all = rows
        .iter()
        .flat_map(|l| l.amenities_list.iter().map(String::as_str));
    largest(value_counts(all), n)
}

/// Pearson correlation over pairwise-complete observations.
///
/// A cell is `None` when fewer than two rows have both values or either
/// column is constant over those rows.
pub fn correlation_matrix(rows: &[&Listing], columns: &[NumericColumn]) -> CorrelationMatrix {
    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(rows, *a, *b)).collect())
        .collect();
    CorrelationMatrix { columns: columns.to_vec(), values }
}

fn pearson(rows: &[&Listing], a: NumericColumn, b: NumericColumn) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|l| Some((a.get(l)?, b.get(l)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Occurrence counts in first-seen order.
fn value_counts<'a, I>(items: I) -> Vec<RankedBar>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<RankedBar> = Vec::new();
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    for item in items {
        let idx = *slot.entry(item).or_insert_with(|| {
            order.push(RankedBar { label: item.to_string(), value: 0.0 });
            order.len() - 1
        });
        order[idx].value += 1.0;
    }
    order
}

/// Stable descending sort by value, truncated to `n`.
fn largest(mut bars: Vec<RankedBar>, n: usize) -> Vec<RankedBar> {
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars.truncate(n);
    bars
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
