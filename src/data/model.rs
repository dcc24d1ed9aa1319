use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::config::GroupingConfig;

/// Entity name the monthly and gas charts fall back to when no country
/// is selected.
pub const WORLD_ENTITY: &str = "World";

/// Bloc aggregates shown in the contribution-share chart.
pub const SHARE_BLOCS: [&str; 2] = [
    "OECD (Jones et al.)",
    "Least developed countries (Jones et al.)",
];

// ---------------------------------------------------------------------------
// GroupLabel – developed / developing classification
// ---------------------------------------------------------------------------

/// Development status of an entity, derived from ISO3 membership in the
/// configured developed-economy set. Total: every ISO3 code maps to
/// exactly one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupLabel {
    Developed,
    Developing,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; 2] = [GroupLabel::Developed, GroupLabel::Developing];
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Developed => write!(f, "Developed"),
            GroupLabel::Developing => write!(f, "Developing"),
        }
    }
}

// ---------------------------------------------------------------------------
// GasSeries – the fixed 6-way gas × source taxonomy
// ---------------------------------------------------------------------------

/// One of the six gas/source contribution series:
/// {CO2, CH4, N2O} × {fossil fuels & industry, agriculture & land use}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GasSeries {
    Co2FossilIndustry,
    Co2Agriculture,
    Ch4FossilIndustry,
    Ch4Agriculture,
    N2oFossilIndustry,
    N2oAgriculture,
}

impl GasSeries {
    /// Stacking order used by the gas contribution chart.
    pub const ALL: [GasSeries; 6] = [
        GasSeries::Co2FossilIndustry,
        GasSeries::Co2Agriculture,
        GasSeries::Ch4FossilIndustry,
        GasSeries::Ch4Agriculture,
        GasSeries::N2oFossilIndustry,
        GasSeries::N2oAgriculture,
    ];
}

impl fmt::Display for GasSeries {
    /// Short legend labels: FF&I = fossil fuels & industry,
    /// AgLU = agriculture & land use.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GasSeries::Co2FossilIndustry => "CO2_FF&I",
            GasSeries::Co2Agriculture => "CO2_AgLU",
            GasSeries::Ch4FossilIndustry => "CH4_FF&I",
            GasSeries::Ch4Agriculture => "CH4_AgLU",
            GasSeries::N2oFossilIndustry => "N2O_FF&I",
            GasSeries::N2oAgriculture => "N2O_AgLU",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Record tables – one struct per source file, long format
// ---------------------------------------------------------------------------

/// One (entity, year) observation of annual surface temperature change,
/// produced by melting the wide source file. Empty wide cells produce no
/// record: a missing measurement is never coerced to a number.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRecord {
    pub entity: String,
    pub iso2: String,
    pub iso3: String,
    pub indicator: String,
    pub unit: String,
    pub year: i32,
    pub value: f64,
    pub group: GroupLabel,
}

/// One (entity, year, month) observation of mean surface temperature
/// change, with a derived first-of-month date for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    pub entity: String,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub value: f64,
    pub date: NaiveDate,
}

impl MonthlyRecord {
    /// Build a record from raw fields; `None` if (year, month) is not a
    /// valid calendar date.
    pub fn new(entity: String, year: i32, month: u32, value: f64) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let month_name = date.format("%B").to_string();
        Some(MonthlyRecord {
            entity,
            year,
            month,
            month_name,
            value,
            date,
        })
    }
}

/// One (entity, year, series) contribution to global warming.
#[derive(Debug, Clone, PartialEq)]
pub struct GasRecord {
    pub entity: String,
    pub year: i32,
    pub series: GasSeries,
    pub value: f64,
}

/// One (entity, year) share of contribution to global warming, for the
/// bloc aggregates in [`SHARE_BLOCS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRecord {
    pub entity: String,
    pub year: i32,
    pub share: f64,
}

// ---------------------------------------------------------------------------
// Session – the loaded tables plus lookup data
// ---------------------------------------------------------------------------

/// All loaded tables for one session, with pre-computed lookups. Built
/// once per load; immutable thereafter. Passed by reference into each
/// pipeline stage (no module-level globals).
#[derive(Debug, Clone)]
pub struct Session {
    pub annual: Vec<AnnualRecord>,
    pub monthly: Vec<MonthlyRecord>,
    pub gas: Vec<GasRecord>,
    pub shares: Vec<ShareRecord>,

    /// Entities present in *all three* of the annual, monthly and gas
    /// tables, sorted. The country selector offers exactly this list.
    pub entities: Vec<String>,
    /// Sorted unique years of the annual table.
    pub years: Vec<i32>,
    /// (min, max) of `years`; (0, 0) when the annual table is empty.
    pub year_span: (i32, i32),

    pub config: GroupingConfig,
}

impl Session {
    /// Build lookup data from the loaded tables.
    pub fn from_tables(
        annual: Vec<AnnualRecord>,
        monthly: Vec<MonthlyRecord>,
        gas: Vec<GasRecord>,
        shares: Vec<ShareRecord>,
        config: GroupingConfig,
    ) -> Self {
        let annual_entities: BTreeSet<&str> = annual.iter().map(|r| r.entity.as_str()).collect();
        let monthly_entities: BTreeSet<&str> = monthly.iter().map(|r| r.entity.as_str()).collect();
        let gas_entities: BTreeSet<&str> = gas.iter().map(|r| r.entity.as_str()).collect();

        let entities: Vec<String> = annual_entities
            .iter()
            .copied()
            .filter(|e| monthly_entities.contains(e) && gas_entities.contains(e))
            .map(|e| e.to_string())
            .collect();

        let year_set: BTreeSet<i32> = annual.iter().map(|r| r.year).collect();
        let year_span = match (year_set.first(), year_set.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0, 0),
        };
        let years: Vec<i32> = year_set.into_iter().collect();

        Session {
            annual,
            monthly,
            gas,
            shares,
            entities,
            years,
            year_span,
            config,
        }
    }
}
