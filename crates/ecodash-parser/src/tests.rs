use std::fs;
use std::path::PathBuf;

use polars::prelude::*;

use crate::errors::ParserError;
use crate::schema::UNKNOWN_CONTINENT;
use crate::{parse_emissions_csv, DatasetCache};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn fixture(name: &str) -> Vec<u8> {
    let path = fixture_path(name);
    fs::read(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", path.display(), err))
}

const HEADER: &str = "territory,iso_code,continent,year,co2,co2_including_luc,cement_co2,coal_co2,flaring_co2,gas_co2,oil_co2,land_use_change_co2,co2_including_luc_per_gdp,share_global_co2_including_luc,temperature_change_from_ghg,temperature_change_from_co2,temperature_change_from_ch4,temperature_change_from_n2o";

#[test]
fn parses_sample_dataset() {
    let dataset = parse_emissions_csv(&fixture("emissions_sample.csv")).expect("parse failed");

    assert_eq!(dataset.height(), 15);
    assert_eq!(dataset.df.column("year").unwrap().dtype(), &DataType::Int64);
    assert_eq!(dataset.df.column("co2").unwrap().dtype(), &DataType::Float64);
    assert_eq!(dataset.df.column("territory").unwrap().dtype(), &DataType::String);
    assert!(dataset.has_column("cumulative_co2_including_luc"));
    assert!(!dataset.has_column("population"), "columns outside the schema are dropped");
}

#[test]
fn blank_cells_load_as_missing() {
    let dataset = parse_emissions_csv(&fixture("emissions_sample.csv")).expect("parse failed");

    let iso = dataset.df.column("iso_code").unwrap().str().unwrap();
    assert_eq!(iso.get(0), None, "World has no ISO code");
    assert_eq!(iso.get(5), Some("ESP"));

    let cement = dataset.df.column("cement_co2").unwrap().f64().unwrap();
    assert_eq!(cement.get(0), None);
    assert_eq!(cement.get(3), Some(1600.0));
}

#[test]
fn empty_continent_loads_as_unknown_sentinel() {
    let content = format!("{HEADER}\nAntarctica,,,1990,1,1,,,,,,,,,,,,\n");
    let dataset = parse_emissions_csv(content.as_bytes()).expect("parse failed");

    let continent = dataset.df.column("continent").unwrap().str().unwrap();
    assert_eq!(continent.get(0), Some(UNKNOWN_CONTINENT));
}

#[test]
fn missing_tokens_are_recognized() {
    let content = format!("{HEADER}\nSpain,ESP,Europe,1990,NA,nan,NaN,null,,,,,,,,,,\n");
    let dataset = parse_emissions_csv(content.as_bytes()).expect("parse failed");

    for column in ["co2", "co2_including_luc", "cement_co2", "coal_co2"] {
        let values = dataset.df.column(column).unwrap().f64().unwrap();
        assert_eq!(values.get(0), None, "{column} should be missing");
    }
}

#[test]
fn float_formatted_years_are_accepted() {
    let content = format!("{HEADER}\nSpain,ESP,Europe,1990.0,1,,,,,,,,,,,,,\n");
    let dataset = parse_emissions_csv(content.as_bytes()).expect("parse failed");

    let year = dataset.df.column("year").unwrap().i64().unwrap();
    assert_eq!(year.get(0), Some(1990));
}

#[test]
fn rejects_non_numeric_measure() {
    let content = format!(
        "{HEADER}\nSpain,ESP,Europe,1990,1,,,,,,,,,,,,,\nSpain,ESP,Europe,1991,lots,,,,,,,,,,,,,\n"
    );
    let err = parse_emissions_csv(content.as_bytes()).expect_err("malformed row accepted");

    match err {
        ParserError::DataRow {
            line_index, column, ..
        } => {
            assert_eq!(line_index, 3);
            assert_eq!(column, "co2");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn rejects_fractional_year() {
    let content = format!("{HEADER}\nSpain,ESP,Europe,1990.5,1,,,,,,,,,,,,,\n");
    let err = parse_emissions_csv(content.as_bytes()).expect_err("fractional year accepted");
    assert!(matches!(err, ParserError::DataRow { column: "year", .. }));
}

#[test]
fn rejects_empty_territory() {
    let content = format!("{HEADER}\n,ESP,Europe,1990,1,,,,,,,,,,,,,\n");
    let err = parse_emissions_csv(content.as_bytes()).expect_err("empty territory accepted");
    assert!(matches!(err, ParserError::DataRow { column: "territory", .. }));
}

#[test]
fn rejects_missing_required_column() {
    let content = "territory,iso_code,continent,year,co2\nSpain,ESP,Europe,1990,1\n";
    let err = parse_emissions_csv(content.as_bytes()).expect_err("incomplete header accepted");
    assert!(matches!(
        err,
        ParserError::MissingColumn {
            column: "co2_including_luc"
        }
    ));
}

#[test]
fn rejects_duplicate_header_column() {
    let content = format!("{HEADER},co2\n");
    let err = parse_emissions_csv(content.as_bytes()).expect_err("duplicate header accepted");
    assert!(matches!(err, ParserError::DuplicateColumn { .. }));
}

#[test]
fn rejects_ragged_rows() {
    let content = format!("{HEADER}\nSpain,ESP,Europe,1990\n");
    let err = parse_emissions_csv(content.as_bytes()).expect_err("short row accepted");
    assert!(matches!(err, ParserError::Csv { .. }));
}

#[test]
fn empty_file_has_no_header() {
    let err = parse_emissions_csv(b"").expect_err("empty file accepted");
    assert!(matches!(err, ParserError::MissingHeader));
}

#[test]
fn header_only_file_yields_empty_dataset() {
    let dataset = parse_emissions_csv(HEADER.as_bytes()).expect("parse failed");
    assert_eq!(dataset.height(), 0);
    assert!(!dataset.has_column("cumulative_co2_including_luc"));
}

#[test]
fn summary_reports_year_range_and_territories() {
    let dataset = parse_emissions_csv(&fixture("emissions_sample.csv")).expect("parse failed");
    let summary = dataset.summary().expect("summary failed");

    assert_eq!(summary.rows, 15);
    assert_eq!(summary.territories, 7);
    assert_eq!(summary.first_year, Some(1850));
    assert_eq!(summary.last_year, Some(2020));
    assert!(summary.continents.iter().any(|c| c == UNKNOWN_CONTINENT));
    assert_eq!(summary.content_hash, dataset.content_hash);

    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert_eq!(json["rows"], 15);
}

#[test]
fn content_hash_tracks_bytes() {
    let first = parse_emissions_csv(HEADER.as_bytes()).expect("parse failed");
    let again = parse_emissions_csv(HEADER.as_bytes()).expect("parse failed");
    let other = parse_emissions_csv(format!("{HEADER}\n").as_bytes()).expect("parse failed");

    assert_eq!(first.content_hash, again.content_hash);
    assert_ne!(first.content_hash, other.content_hash);
}

#[test]
fn cache_reuses_unchanged_file() {
    let mut cache = DatasetCache::new();
    let path = fixture_path("emissions_sample.csv");

    let first = cache.load(&path).expect("first load failed");
    let second = cache.load(&path).expect("second load failed");

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.invalidate(&path));
    assert!(cache.is_empty());
}

#[test]
fn cache_reports_missing_file() {
    let mut cache = DatasetCache::new();
    let err = cache
        .load(&fixture_path("does_not_exist.csv"))
        .expect_err("missing file loaded");
    assert!(matches!(err, ParserError::Io { .. }));
}

#[test]
fn annual_growth_column_loads_when_present() {
    let content = format!("{HEADER},co2_growth_prct\nSpain,ESP,Europe,1990,1,,,,,,,,,,,,,,2.5\n");
    let dataset = parse_emissions_csv(content.as_bytes()).expect("parse failed");
    let growth = dataset.df.column("co2_growth_prct").unwrap().f64().unwrap();
    assert_eq!(growth.get(0), Some(2.5));

    let without = parse_emissions_csv(&fixture("emissions_sample.csv")).expect("parse failed");
    assert!(!without.has_column("co2_growth_prct"));
}
