use polars::prelude::*;

use ecodash_core::aggregate::{
    aggregate_by_group, decade_totals, sum_by_group, sum_by_group_ordered, with_decade,
    Aggregation, GroupOrder,
};

fn regional() -> DataFrame {
    df!(
        "continent" => &[Some("Europe"), Some("Asia"), Some("Europe"), None, Some("Asia")],
        "year" => &[1987i64, 1987, 1991, 1995, 2004],
        "co2" => &[Some(10.0f64), Some(20.0), None, Some(5.0), Some(-3.0)],
    )
    .unwrap()
}

fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

fn texts(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

#[test]
fn group_sums_conserve_the_column_total() {
    let df = regional();
    let grouped = sum_by_group(&df, &["continent"], "co2").unwrap();

    let input_total: f64 = floats(&df, "co2").into_iter().flatten().sum();
    let grouped_total: f64 = floats(&grouped, "co2").into_iter().flatten().sum();
    assert!((input_total - grouped_total).abs() < 1e-9);
}

#[test]
fn groups_keep_first_seen_order_and_missing_keys() {
    let df = regional();
    let grouped = sum_by_group(&df, &["continent"], "co2").unwrap();

    assert_eq!(
        texts(&grouped, "continent"),
        vec![Some("Europe".to_string()), Some("Asia".to_string()), None]
    );
    assert_eq!(floats(&grouped, "co2"), vec![Some(10.0), Some(17.0), Some(5.0)]);
}

#[test]
fn sorted_order_puts_missing_keys_first() {
    let df = regional();
    let grouped = sum_by_group_ordered(&df, &["continent"], "co2", GroupOrder::Sorted).unwrap();

    assert_eq!(
        texts(&grouped, "continent"),
        vec![None, Some("Asia".to_string()), Some("Europe".to_string())]
    );
}

#[test]
fn all_missing_group_sums_to_zero() {
    let df = df!(
        "continent" => &["Europe", "Europe"],
        "co2" => &[None::<f64>, None],
    )
    .unwrap();
    let grouped = sum_by_group(&df, &["continent"], "co2").unwrap();
    assert_eq!(floats(&grouped, "co2"), vec![Some(0.0)]);
}

#[test]
fn mean_ignores_missing_values() {
    let df = regional();
    let grouped = aggregate_by_group(
        &df,
        &["continent"],
        &["co2"],
        Aggregation::Mean,
        GroupOrder::FirstSeen,
    )
    .unwrap();
    assert_eq!(floats(&grouped, "co2"), vec![Some(10.0), Some(8.5), Some(5.0)]);
}

#[test]
fn composite_keys_keep_integer_types() {
    let df = with_decade(&regional()).unwrap();
    let grouped = sum_by_group_ordered(&df, &["decade", "continent"], "co2", GroupOrder::Sorted)
        .unwrap();

    assert_eq!(grouped.column("decade").unwrap().dtype(), &DataType::Int64);
    let decades: Vec<Option<i64>> = grouped
        .column("decade")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        decades,
        vec![Some(1980), Some(1980), Some(1990), Some(1990), Some(2000)]
    );
}

#[test]
fn decade_totals_are_sorted_by_decade() {
    let df = df!(
        "year" => &[2011i64, 1850, 1859, 2010],
        "co2" => &[1.0f64, 2.0, 3.0, 4.0],
    )
    .unwrap();
    let totals = decade_totals(&df, "co2", Aggregation::Sum).unwrap();

    let decades: Vec<Option<i64>> = totals.column("decade").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(decades, vec![Some(1850), Some(2010)]);
    assert_eq!(floats(&totals, "co2"), vec![Some(5.0), Some(5.0)]);

    let means = decade_totals(&df, "co2", Aggregation::Mean).unwrap();
    assert_eq!(floats(&means, "co2"), vec![Some(2.5), Some(2.5)]);
}

#[test]
fn string_value_column_is_rejected() {
    let df = regional();
    let result = sum_by_group(&df, &["year"], "continent");
    assert!(result.is_err());
}
