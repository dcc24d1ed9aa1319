use std::collections::BTreeSet;
use std::path::Path;

use csv::StringRecord;

use super::model::{AnnualRecord, GasSeries, GroupLabel};
use super::DataError;

/// Identifier columns of the wide annual temperature file, in order.
pub const ANNUAL_ID_COLUMNS: [&str; 5] = ["Country", "ISO2", "ISO3", "Indicator", "Unit"];

/// Prefix marking a gas/source change column in the contribution file.
pub const GAS_COLUMN_PREFIX: &str = "Change in";

// ---------------------------------------------------------------------------
// Year-column detection
// ---------------------------------------------------------------------------

/// Positions and parsed years of headers that are entirely ASCII digits.
///
/// A digit-only header that still fails integer parsing (overflow) is a
/// schema error rather than silently skipped.
pub fn year_columns(path: &Path, headers: &[String]) -> Result<Vec<(usize, i32)>, DataError> {
    let mut columns = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() || !header.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let year = header.parse::<i32>().map_err(|_| {
            DataError::schema(path, format!("year column {header:?} is out of range"))
        })?;
        columns.push((idx, year));
    }
    Ok(columns)
}

// ---------------------------------------------------------------------------
// Wide → long melt of the annual temperature table
// ---------------------------------------------------------------------------

/// Melt the wide annual file into one [`AnnualRecord`] per
/// (row, year column) pair with a non-empty cell. Pivoting the output
/// back on (entity, year) reproduces the wide values exactly.
pub fn melt_annual(
    path: &Path,
    headers: &[String],
    rows: &[StringRecord],
    developed: &BTreeSet<String>,
) -> Result<Vec<AnnualRecord>, DataError> {
    let id_idx: Vec<usize> = ANNUAL_ID_COLUMNS
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::schema(path, format!("missing column {name:?}")))
        })
        .collect::<Result<_, _>>()?;

    let years = year_columns(path, headers)?;
    if years.is_empty() {
        return Err(DataError::schema(path, "no numeric year columns found"));
    }

    let mut records = Vec::new();
    for (row_no, row) in rows.iter().enumerate() {
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();
        let iso3 = field(id_idx[2]);
        let group = group_label(iso3, developed);

        for &(col, year) in &years {
            let cell = field(col);
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                DataError::schema(
                    path,
                    format!("row {}: {cell:?} in year column {year} is not a number", row_no + 2),
                )
            })?;
            records.push(AnnualRecord {
                entity: field(id_idx[0]).to_string(),
                iso2: field(id_idx[1]).to_string(),
                iso3: iso3.to_string(),
                indicator: field(id_idx[3]).to_string(),
                unit: field(id_idx[4]).to_string(),
                year,
                value,
                group,
            });
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Group labelling
// ---------------------------------------------------------------------------

/// Classify an ISO3 code against the configured developed-economy set.
/// Pure and total: every code maps to exactly one label.
pub fn group_label(iso3: &str, developed: &BTreeSet<String>) -> GroupLabel {
    if developed.contains(iso3) {
        GroupLabel::Developed
    } else {
        GroupLabel::Developing
    }
}

// ---------------------------------------------------------------------------
// Gas column classification
// ---------------------------------------------------------------------------

/// Map a "Change in …" column header onto the fixed six-way taxonomy by
/// substring match. Nitrous-oxide phrases are checked before methane,
/// which is checked before the CO2 fallbacks; the order is load-bearing
/// because every header also names a source axis.
pub fn gas_series(header: &str) -> Option<GasSeries> {
    if !header.starts_with(GAS_COLUMN_PREFIX) {
        return None;
    }
    let h = header.to_ascii_lowercase();
    let fossil = h.contains("fossil fuels");
    let series = if h.contains("nitrous oxide") {
        if fossil {
            GasSeries::N2oFossilIndustry
        } else {
            GasSeries::N2oAgriculture
        }
    } else if h.contains("methane") {
        if fossil {
            GasSeries::Ch4FossilIndustry
        } else {
            GasSeries::Ch4Agriculture
        }
    } else if fossil {
        GasSeries::Co2FossilIndustry
    } else {
        GasSeries::Co2Agriculture
    };
    Some(series)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn wide_headers() -> Vec<String> {
        headers(&["Country", "ISO2", "ISO3", "Indicator", "Unit", "1990", "1991"])
    }

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn developed() -> BTreeSet<String> {
        ["USA", "DEU"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn year_columns_finds_digit_headers_only() {
        let h = headers(&["Country", "1990", "ISO3", "2024", "Unit"]);
        let cols = year_columns(Path::new("t.csv"), &h).unwrap();
        assert_eq!(cols, vec![(1, 1990), (3, 2024)]);
    }

    #[test]
    fn year_columns_rejects_overflowing_header() {
        let h = headers(&["Country", "99999999999999999999"]);
        let err = year_columns(Path::new("t.csv"), &h).unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }

    #[test]
    fn melt_emits_one_record_per_non_empty_cell() {
        let rows = vec![
            row(&["United States", "US", "USA", "Temp change", "C", "0.5", "0.7"]),
            row(&["Kenya", "KE", "KEN", "Temp change", "C", "", "0.3"]),
        ];
        let records = melt_annual(Path::new("t.csv"), &wide_headers(), &rows, &developed()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].year, 1990);
        assert_eq!(records[0].value, 0.5);
        assert_eq!(records[0].group, GroupLabel::Developed);
        assert_eq!(records[2].entity, "Kenya");
        assert_eq!(records[2].year, 1991);
        assert_eq!(records[2].group, GroupLabel::Developing);
    }

    #[test]
    fn melt_round_trips_to_wide_values() {
        let rows = vec![
            row(&["United States", "US", "USA", "Temp change", "C", "0.5", "0.7"]),
            row(&["Kenya", "KE", "KEN", "Temp change", "C", "-0.1", ""]),
        ];
        let records = melt_annual(Path::new("t.csv"), &wide_headers(), &rows, &developed()).unwrap();

        // Pivot back on (entity, year) and compare against the wide cells.
        let mut pivot: BTreeMap<(&str, i32), f64> = BTreeMap::new();
        for r in &records {
            assert!(pivot.insert((r.entity.as_str(), r.year), r.value).is_none());
        }
        assert_eq!(pivot.get(&("United States", 1990)), Some(&0.5));
        assert_eq!(pivot.get(&("United States", 1991)), Some(&0.7));
        assert_eq!(pivot.get(&("Kenya", 1990)), Some(&-0.1));
        assert_eq!(pivot.get(&("Kenya", 1991)), None);
    }

    #[test]
    fn melt_requires_id_columns() {
        let h = headers(&["Country", "ISO3", "1990"]);
        let err = melt_annual(Path::new("t.csv"), &h, &[], &developed()).unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }

    #[test]
    fn melt_rejects_non_numeric_cell() {
        let rows = vec![row(&["Kenya", "KE", "KEN", "Temp change", "C", "n/a", ""])];
        let err = melt_annual(Path::new("t.csv"), &wide_headers(), &rows, &developed()).unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }

    #[test]
    fn group_label_is_total_and_deterministic() {
        let set = developed();
        assert_eq!(group_label("USA", &set), GroupLabel::Developed);
        assert_eq!(group_label("KEN", &set), GroupLabel::Developing);
        // Unknown and empty codes still classify.
        assert_eq!(group_label("???", &set), GroupLabel::Developing);
        assert_eq!(group_label("", &set), GroupLabel::Developing);
    }

    #[test]
    fn gas_series_precedence() {
        let cases = [
            (
                "Change in global mean surface temperature caused by nitrous oxide emissions from fossil fuels and industry",
                GasSeries::N2oFossilIndustry,
            ),
            (
                "Change in global mean surface temperature caused by nitrous oxide emissions from agriculture and land use",
                GasSeries::N2oAgriculture,
            ),
            (
                "Change in global mean surface temperature caused by methane emissions from fossil fuels and industry",
                GasSeries::Ch4FossilIndustry,
            ),
            (
                "Change in global mean surface temperature caused by methane emissions from agriculture and land use",
                GasSeries::Ch4Agriculture,
            ),
            (
                "Change in global mean surface temperature caused by CO2 emissions from fossil fuels and industry",
                GasSeries::Co2FossilIndustry,
            ),
            (
                "Change in global mean surface temperature caused by CO2 emissions from agriculture and land use",
                GasSeries::Co2Agriculture,
            ),
        ];
        for (header, expected) in cases {
            assert_eq!(gas_series(header), Some(expected), "{header}");
        }
        assert_eq!(gas_series("Entity"), None);
        assert_eq!(gas_series("Year"), None);
    }
}
