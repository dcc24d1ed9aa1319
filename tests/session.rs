//! End-to-end tests over a miniature data directory: session loading,
//! error taxonomy, and the filter → aggregate → present pipeline.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use climate_story::data::aggregate::grouped_mean;
use climate_story::data::filter::Filters;
use climate_story::data::loader::{self, ANNUAL_FILE, GAS_FILE, MONTHLY_FILE, SHARE_FILE};
use climate_story::data::model::GroupLabel;
use climate_story::data::present;
use climate_story::data::DataError;
use climate_story::state::Views;

fn write_annual(dir: &Path) {
    fs::write(
        dir.join(ANNUAL_FILE),
        "Country,ISO2,ISO3,Indicator,Unit,1961,1990,1993,2024\n\
         United States,US,USA,TempChange,C,0.10,0.50,0.60,1.20\n\
         Kenya,KE,KEN,TempChange,C,0.20,0.40,,1.00\n\
         World,,OWID_WRL,TempChange,C,0.15,0.45,0.55,1.10\n",
    )
    .unwrap();
}

fn write_monthly(dir: &Path) {
    fs::write(
        dir.join(MONTHLY_FILE),
        "Entity,Year,Month,Mean_Temp\n\
         World,1990,1,0.3\n\
         World,1990,2,0.4\n\
         United States,1990,1,0.2\n\
         United States,1990,2,\n",
    )
    .unwrap();
}

fn write_gas(dir: &Path) {
    fs::write(
        dir.join(GAS_FILE),
        "Entity,Code,Year,\
         Change in global mean surface temperature caused by CO2 emissions from fossil fuels and industry,\
         Change in global mean surface temperature caused by methane emissions from agriculture and land use\n\
         World,OWID_WRL,1990,0.5,0.1\n\
         United States,USA,1990,0.05,0.01\n",
    )
    .unwrap();
}

fn write_share(dir: &Path) {
    fs::write(
        dir.join(SHARE_FILE),
        "Entity,Year,Share of contribution to global warming\n\
         OECD (Jones et al.),1990,52.1\n\
         Least developed countries (Jones et al.),1990,2.5\n\
         World,1990,100\n",
    )
    .unwrap();
}

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_annual(dir.path());
    write_monthly(dir.path());
    write_gas(dir.path());
    write_share(dir.path());
    dir
}

#[test]
fn loads_session_and_builds_lookups() {
    let dir = data_dir();
    let session = loader::load_session(dir.path()).unwrap();

    // US: 4 cells, Kenya: 3 (one blank), World: 4.
    assert_eq!(session.annual.len(), 11);
    // The empty US/February measurement is skipped, never zero-filled.
    assert_eq!(session.monthly.len(), 3);
    assert_eq!(session.gas.len(), 4);
    assert_eq!(session.shares.len(), 3);

    // Kenya is missing from the monthly table, so it is not offered.
    assert_eq!(session.entities, vec!["United States", "World"]);
    assert_eq!(session.years, vec![1961, 1990, 1993, 2024]);
    assert_eq!(session.year_span, (1961, 2024));

    let us = session
        .annual
        .iter()
        .find(|r| r.iso3 == "USA")
        .unwrap();
    assert_eq!(us.group, GroupLabel::Developed);
    let world = session
        .annual
        .iter()
        .find(|r| r.iso3 == "OWID_WRL")
        .unwrap();
    assert_eq!(world.group, GroupLabel::Developing);

    let january = &session.monthly[0];
    assert_eq!(january.month_name, "January");
    assert_eq!(january.date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = data_dir();
    fs::remove_file(dir.path().join(MONTHLY_FILE)).unwrap();

    let err = loader::load_session(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Load { .. }), "{err}");
}

#[test]
fn annual_without_year_columns_is_a_schema_error() {
    let dir = data_dir();
    fs::write(
        dir.path().join(ANNUAL_FILE),
        "Country,ISO2,ISO3,Indicator,Unit\nKenya,KE,KEN,TempChange,C\n",
    )
    .unwrap();

    let err = loader::load_session(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Schema { .. }), "{err}");
}

#[test]
fn grouping_config_swaps_the_taxonomy() {
    let dir = data_dir();
    fs::write(
        dir.path().join(loader::CONFIG_FILE),
        r#"{"developed_iso3": ["KEN"], "pivot_year": 2000}"#,
    )
    .unwrap();

    let session = loader::load_session(dir.path()).unwrap();
    assert_eq!(session.config.pivot_year, 2000);

    let kenya = session.annual.iter().find(|r| r.iso3 == "KEN").unwrap();
    assert_eq!(kenya.group, GroupLabel::Developed);
    let us = session.annual.iter().find(|r| r.iso3 == "USA").unwrap();
    assert_eq!(us.group, GroupLabel::Developing);
}

#[test]
fn invalid_grouping_config_is_a_schema_error() {
    let dir = data_dir();
    fs::write(dir.path().join(loader::CONFIG_FILE), "{not json").unwrap();

    let err = loader::load_session(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Schema { .. }), "{err}");
}

#[test]
fn end_to_end_entity_selection_with_full_range() {
    let dir = data_dir();
    let session = loader::load_session(dir.path()).unwrap();

    let mut filters = Filters::unfiltered(session.year_span);
    filters.entity = Some("United States".to_string());
    filters.year_range = (1961, 2024);
    let views = Views::build(&session, &filters);

    // Charts view: only US rows, all years in range.
    assert_eq!(views.annual.len(), 4);
    for &i in &views.annual {
        let r = &session.annual[i];
        assert_eq!(r.entity, "United States");
        assert!((1961..=2024).contains(&r.year));
    }

    // Monthly chart follows the selected entity.
    assert_eq!(views.resolved_entity, "United States");
    assert_eq!(views.monthly.len(), 1);
    assert_eq!(session.monthly[views.monthly[0]].entity, "United States");

    // Group-comparison line source: one row per (year, group) averaged
    // over ALL entities — unaffected by the entity selector.
    let means = grouped_mean(views.range_only.iter().map(|&i| {
        let r = &session.annual[i];
        ((r.year, r.group), r.value)
    }));
    assert_eq!(means.len(), 8);
    assert_eq!(means[&(1990, GroupLabel::Developed)], 0.50);
    let developing_1990 = means[&(1990, GroupLabel::Developing)];
    assert!((developing_1990 - 0.425).abs() < 1e-12);
    // Kenya has no 1993 measurement; the World row alone defines it.
    assert_eq!(means[&(1993, GroupLabel::Developing)], 0.55);
}

#[test]
fn empty_views_flow_through_the_pipeline() {
    let dir = data_dir();
    let session = loader::load_session(dir.path()).unwrap();

    // Kenya has no 1993 measurement: valid empty state, not an error.
    let mut filters = Filters::unfiltered(session.year_span);
    filters.entity = Some("Kenya".to_string());
    filters.year = Some(1993);
    let views = Views::build(&session, &filters);

    assert!(views.annual.is_empty());
    assert!(present::scatter_series(&session.annual, &views.annual).is_empty());
    let means = grouped_mean(
        views
            .annual
            .iter()
            .map(|&i| (session.annual[i].year, session.annual[i].value)),
    );
    assert!(means.is_empty());
}
