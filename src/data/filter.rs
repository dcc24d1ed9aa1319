use super::model::{AnnualRecord, GasRecord, MonthlyRecord, ShareRecord};

// ---------------------------------------------------------------------------
// Filter predicates: user-selected country / year / year range
// ---------------------------------------------------------------------------

/// Per-session filter selections, owned by the UI and read by the filter
/// engine on every interaction. `None` means "All" (pass-through).
/// Invariant: `year_range.0 <= year_range.1`, maintained by the setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub entity: Option<String>,
    pub year: Option<i32>,
    /// Inclusive year bounds.
    pub year_range: (i32, i32),
}

impl Filters {
    /// Pass-through filters spanning the whole dataset.
    pub fn unfiltered(year_span: (i32, i32)) -> Self {
        Filters {
            entity: None,
            year: None,
            year_range: year_span,
        }
    }

    /// Set the lower bound, clamping so the range stays ordered.
    pub fn set_range_lower(&mut self, lower: i32) {
        self.year_range.0 = lower.min(self.year_range.1);
    }

    /// Set the upper bound, clamping so the range stays ordered.
    pub fn set_range_upper(&mut self, upper: i32) {
        self.year_range.1 = upper.max(self.year_range.0);
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Accessors the engine needs from a record; implemented by all four
/// record tables so one engine serves them all.
pub trait YearRow {
    fn entity(&self) -> &str;
    fn year(&self) -> i32;
}

impl YearRow for AnnualRecord {
    fn entity(&self) -> &str {
        &self.entity
    }
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRow for MonthlyRecord {
    fn entity(&self) -> &str {
        &self.entity
    }
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRow for GasRecord {
    fn entity(&self) -> &str {
        &self.entity
    }
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRow for ShareRecord {
    fn entity(&self) -> &str {
        &self.entity
    }
    fn year(&self) -> i32 {
        self.year
    }
}

/// Return indices of rows passing all given predicates (logical AND).
///
/// Each predicate is optional; `None` passes everything. Entity matches
/// exactly, year matches exactly, the range is inclusive on both ends.
/// The source table is never mutated; the result is always a subset of
/// its row indices, possibly empty. An empty view is a valid,
/// renderable state, not an error.
pub fn apply_filters<R: YearRow>(
    rows: &[R],
    entity: Option<&str>,
    year: Option<i32>,
    year_range: Option<(i32, i32)>,
) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            if let Some(e) = entity {
                if row.entity() != e {
                    return false;
                }
            }
            if let Some(y) = year {
                if row.year() != y {
                    return false;
                }
            }
            if let Some((lo, hi)) = year_range {
                if row.year() < lo || row.year() > hi {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
