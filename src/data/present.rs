//! Presentation adapter: project filtered/aggregated rows into the
//! shapes the chart and table widgets consume. Pure renaming, grouping
//! and column selection. No aggregation, no value changes; every input
//! row maps onto exactly one output point.

use std::collections::BTreeMap;

use super::model::{
    AnnualRecord, GasRecord, GasSeries, GroupLabel, MonthlyRecord, ShareRecord,
};

// ---------------------------------------------------------------------------
// Chart sources
// ---------------------------------------------------------------------------

/// One scatter series per entity: (year, temp change) points.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub entity: String,
    pub points: Vec<[f64; 2]>,
}

/// Group the annual view into per-entity scatter series, in first-seen
/// order of the view.
pub fn scatter_series(annual: &[AnnualRecord], view: &[usize]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for &i in view {
        let r = &annual[i];
        let point = [f64::from(r.year), r.value];
        match series.iter_mut().find(|s| s.entity == r.entity) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                entity: r.entity.clone(),
                points: vec![point],
            }),
        }
    }
    series
}

/// One line per year of the monthly view: (month, temp change) points
/// plus the year's average for color ranking, when defined.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub year: i32,
    pub yearly_avg: Option<f64>,
    pub points: Vec<[f64; 2]>,
}

/// Group the monthly view into per-year line series sorted by year and
/// month, attaching the externally computed yearly averages.
pub fn monthly_series(
    monthly: &[MonthlyRecord],
    view: &[usize],
    yearly_avg: &BTreeMap<i32, f64>,
) -> Vec<MonthlySeries> {
    let mut by_year: BTreeMap<i32, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in view {
        let r = &monthly[i];
        by_year
            .entry(r.year)
            .or_default()
            .push([f64::from(r.month), r.value]);
    }
    by_year
        .into_iter()
        .map(|(year, mut points)| {
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            MonthlySeries {
                year,
                yearly_avg: yearly_avg.get(&year).copied(),
                points,
            }
        })
        .collect()
}

/// One stack layer per gas series: (year, temp change) bars.
#[derive(Debug, Clone, PartialEq)]
pub struct GasStack {
    pub series: GasSeries,
    pub bars: Vec<[f64; 2]>,
}

/// Group the gas view by series in the fixed stacking order, each layer
/// sorted by year. Series with no rows in view are omitted.
pub fn gas_stacks(gas: &[GasRecord], view: &[usize]) -> Vec<GasStack> {
    let mut by_series: BTreeMap<GasSeries, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in view {
        let r = &gas[i];
        by_series
            .entry(r.series)
            .or_default()
            .push([f64::from(r.year), r.value]);
    }
    GasSeries::ALL
        .iter()
        .filter_map(|series| {
            let mut bars = by_series.remove(series)?;
            bars.sort_by(|a, b| a[0].total_cmp(&b[0]));
            Some(GasStack {
                series: *series,
                bars,
            })
        })
        .collect()
}

/// One line/bar series per group label: (x, mean temp change) points,
/// where x is a year or a 5-year bucket label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSeries {
    pub group: GroupLabel,
    pub points: Vec<[f64; 2]>,
}

/// Split `(x, group) → mean` rows into one series per group label.
pub fn group_series(means: &BTreeMap<(i32, GroupLabel), f64>) -> Vec<GroupSeries> {
    GroupLabel::ALL
        .iter()
        .map(|&group| GroupSeries {
            group,
            points: means
                .iter()
                .filter(|((_, g), _)| *g == group)
                .map(|(&(x, _), &mean)| [f64::from(x), mean])
                .collect(),
        })
        .filter(|s| !s.points.is_empty())
        .collect()
}

/// One area series per bloc entity: (year, share) points.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareSeries {
    pub entity: String,
    pub points: Vec<[f64; 2]>,
}

/// Group the share view into per-entity area series sorted by year.
pub fn share_series(shares: &[ShareRecord], view: &[usize]) -> Vec<ShareSeries> {
    let mut series: Vec<ShareSeries> = Vec::new();
    for &i in view {
        let r = &shares[i];
        let point = [f64::from(r.year), r.share];
        match series.iter_mut().find(|s| s.entity == r.entity) {
            Some(s) => s.points.push(point),
            None => series.push(ShareSeries {
                entity: r.entity.clone(),
                points: vec![point],
            }),
        }
    }
    for s in &mut series {
        s.points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }
    series
}

// ---------------------------------------------------------------------------
// Table sources – column headings and row projections for the data tab
// ---------------------------------------------------------------------------

pub const ANNUAL_COLUMNS: [&str; 8] = [
    "Country",
    "ISO2",
    "ISO3",
    "Indicator",
    "Unit",
    "Year",
    "Temp Change (°C)",
    "Group",
];

pub fn annual_row(r: &AnnualRecord) -> [String; 8] {
    [
        r.entity.clone(),
        r.iso2.clone(),
        r.iso3.clone(),
        r.indicator.clone(),
        r.unit.clone(),
        r.year.to_string(),
        format!("{:.3}", r.value),
        r.group.to_string(),
    ]
}

pub const MONTHLY_COLUMNS: [&str; 5] = [
    "Entity",
    "Date",
    "Year",
    "Month",
    "Monthly Avg Temp Change (°C)",
];

pub fn monthly_row(r: &MonthlyRecord) -> [String; 5] {
    [
        r.entity.clone(),
        r.date.to_string(),
        r.year.to_string(),
        r.month_name.clone(),
        format!("{:.3}", r.value),
    ]
}

pub const GAS_COLUMNS: [&str; 4] = ["Entity", "Year", "Series", "Temp Change (°C)"];

pub fn gas_row(r: &GasRecord) -> [String; 4] {
    [
        r.entity.clone(),
        r.year.to_string(),
        r.series.to_string(),
        format!("{:.5}", r.value),
    ]
}

pub const SHARE_COLUMNS: [&str; 3] = ["Entity", "Year", "Share of contribution (%)"];

pub fn share_row(r: &ShareRecord) -> [String; 3] {
    [
        r.entity.clone(),
        r.year.to_string(),
        format!("{:.3}", r.share),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::GroupLabel;

    fn record(entity: &str, year: i32, value: f64) -> AnnualRecord {
        AnnualRecord {
            entity: entity.to_string(),
            iso2: String::new(),
            iso3: String::new(),
            indicator: String::new(),
            unit: String::new(),
            year,
            value,
            group: GroupLabel::Developing,
        }
    }

    #[test]
    fn scatter_preserves_row_count_and_values() {
        let annual = vec![
            record("Kenya", 1990, 0.1),
            record("Japan", 1990, 0.2),
            record("Kenya", 1991, 0.3),
        ];
        let view = vec![0, 1, 2];
        let series = scatter_series(&annual, &view);

        let total: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, view.len());
        // First-seen entity order.
        assert_eq!(series[0].entity, "Kenya");
        assert_eq!(series[1].entity, "Japan");
        assert_eq!(series[0].points, vec![[1990.0, 0.1], [1991.0, 0.3]]);
    }

    #[test]
    fn scatter_respects_the_view_subset() {
        let annual = vec![record("Kenya", 1990, 0.1), record("Japan", 1990, 0.2)];
        let series = scatter_series(&annual, &[1]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].entity, "Japan");
    }

    #[test]
    fn monthly_series_sorts_and_joins_averages() {
        let monthly = vec![
            MonthlyRecord::new("World".into(), 1990, 2, 0.4).unwrap(),
            MonthlyRecord::new("World".into(), 1990, 1, 0.2).unwrap(),
            MonthlyRecord::new("World".into(), 1991, 1, 0.6).unwrap(),
        ];
        let avgs = BTreeMap::from([(1990, 0.3)]);
        let series = monthly_series(&monthly, &[0, 1, 2], &avgs);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].year, 1990);
        assert_eq!(series[0].points, vec![[1.0, 0.2], [2.0, 0.4]]);
        assert_eq!(series[0].yearly_avg, Some(0.3));
        assert_eq!(series[1].yearly_avg, None);
    }

    #[test]
    fn gas_stacks_follow_fixed_series_order() {
        let gas = vec![
            GasRecord {
                entity: "World".into(),
                year: 1990,
                series: GasSeries::N2oAgriculture,
                value: 0.01,
            },
            GasRecord {
                entity: "World".into(),
                year: 1990,
                series: GasSeries::Co2FossilIndustry,
                value: 0.5,
            },
        ];
        let stacks = gas_stacks(&gas, &[0, 1]);
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0].series, GasSeries::Co2FossilIndustry);
        assert_eq!(stacks[1].series, GasSeries::N2oAgriculture);
    }

    #[test]
    fn group_series_splits_by_label() {
        let means = BTreeMap::from([
            ((1990, GroupLabel::Developed), 0.5),
            ((1990, GroupLabel::Developing), 0.3),
            ((1995, GroupLabel::Developing), 0.4),
        ]);
        let series = group_series(&means);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].group, GroupLabel::Developed);
        assert_eq!(series[0].points, vec![[1990.0, 0.5]]);
        assert_eq!(series[1].points, vec![[1990.0, 0.3], [1995.0, 0.4]]);
    }

    #[test]
    fn table_rows_project_without_altering_values() {
        let r = record("Kenya", 1991, 0.25);
        let row = annual_row(&r);
        assert_eq!(row[0], "Kenya");
        assert_eq!(row[5], "1991");
        assert_eq!(row[6], "0.250");
        assert_eq!(row[7], "Developing");
    }
}
