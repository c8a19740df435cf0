use polars::prelude::*;

use ecodash_core::cumulative::{cumulative_sum, cumulative_sum_within};

fn running(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

#[test]
fn missing_values_carry_the_running_total() {
    let df = df!(
        "year" => &[1850i64, 1860, 1870, 1880],
        "co2" => &[Some(1.0f64), Some(2.0), None, Some(4.0)],
    )
    .unwrap();
    let output = cumulative_sum(&df, "co2").unwrap();

    assert_eq!(
        running(&output, "cumulative_co2"),
        vec![Some(1.0), Some(3.0), Some(3.0), Some(7.0)]
    );
    assert_eq!(output.width(), 3);
}

#[test]
fn each_partition_keeps_its_own_total() {
    let df = df!(
        "territory" => &["Spain", "China", "Spain", "China"],
        "co2" => &[1.0f64, 10.0, 2.0, 20.0],
    )
    .unwrap();
    let output = cumulative_sum_within(&df, "co2", "territory").unwrap();

    assert_eq!(
        running(&output, "cumulative_co2"),
        vec![Some(1.0), Some(10.0), Some(3.0), Some(30.0)]
    );
}
