use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Grouping configuration
// ---------------------------------------------------------------------------

/// Swappable developed/developing taxonomy plus the variability pivot
/// year. Loaded from an optional `grouping.json` in the data directory;
/// the defaults match the dashboard's original classification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// ISO3 codes classified as developed; everything else is developing.
    pub developed_iso3: BTreeSet<String>,
    /// Boundary for the variability comparison: early is `year <
    /// pivot_year`, late is `year >= pivot_year`.
    pub pivot_year: i32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        let developed_iso3 = [
            "USA", "CAN", "GBR", "DEU", "FRA", "JPN", "AUS", "NZL", "NOR", "SWE", "CHE",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        GroupingConfig {
            developed_iso3,
            pivot_year: 1993,
        }
    }
}
