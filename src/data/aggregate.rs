use std::collections::BTreeMap;

use super::model::AnnualRecord;

// ---------------------------------------------------------------------------
// Scalar statistics
// ---------------------------------------------------------------------------

/// Sample standard deviation (n − 1 denominator).
///
/// `None` for fewer than two values: the statistic is undefined there
/// and must never be coerced to zero.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(var.sqrt())
}

/// Arithmetic mean of values partitioned by key.
///
/// Non-finite values are excluded before averaging (an undefined
/// measurement is never treated as zero). Empty input yields an empty
/// map, not an error. Keys iterate in sorted order.
pub fn grouped_mean<K: Ord>(pairs: impl IntoIterator<Item = (K, f64)>) -> BTreeMap<K, f64> {
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for (key, value) in pairs {
        if !value.is_finite() {
            continue;
        }
        let slot = sums.entry(key).or_insert((0.0, 0));
        slot.0 += value;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// Bucket a year into its 5-year group, labelled by the lower bound:
/// floor division, so 1990–1994 all map to 1990.
pub fn five_year_bucket(year: i32) -> i32 {
    year.div_euclid(5) * 5
}

// ---------------------------------------------------------------------------
// Variability delta: which entities calmed down after the pivot year
// ---------------------------------------------------------------------------

/// Per-entity change in temperature variability across the pivot year.
#[derive(Debug, Clone, PartialEq)]
pub struct VariabilityRow {
    pub entity: String,
    pub std_early: f64,
    pub std_late: f64,
    /// `std_late - std_early`; always negative in the returned rows.
    pub delta: f64,
}

/// Compare per-entity sample standard deviation before and after the
/// pivot year (early: year < pivot, late: year ≥ pivot).
///
/// Entities are inner-joined across the two splits: an entity needs at
/// least two data points in *both* periods for a defined statistic, and
/// is dropped otherwise. Only entities with decreasing variability
/// (delta < 0) are returned, sorted ascending, most improved first.
pub fn variability_delta(records: &[AnnualRecord], pivot_year: i32) -> Vec<VariabilityRow> {
    let mut early: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut late: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in records {
        let split = if r.year < pivot_year { &mut early } else { &mut late };
        split.entry(r.entity.as_str()).or_default().push(r.value);
    }

    let mut rows: Vec<VariabilityRow> = early
        .iter()
        .filter_map(|(entity, early_values)| {
            let std_early = sample_std(early_values)?;
            let std_late = sample_std(late.get(entity)?)?;
            let delta = std_late - std_early;
            (delta < 0.0).then(|| VariabilityRow {
                entity: entity.to_string(),
                std_early,
                std_late,
                delta,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.delta.total_cmp(&b.delta));
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
