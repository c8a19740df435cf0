use polars::prelude::*;

use crate::aggregate::{aggregate_by_group, with_decade, Aggregation, GroupOrder};
use crate::columns::{growth_column, DECADE, YEAR};
use crate::error::Result;
use crate::frame::{float_values, require_key, require_numeric, round_to, sorted};
use crate::palette::{bucket_color, SeverityScale};

// Missing when the previous value is zero.
fn percent_change(value_column: &str) -> Expr {
    let current = col(value_column).cast(DataType::Float64);
    let previous = current.clone().shift(lit(1));
    when(previous.clone().eq(lit(0.0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise((current - previous.clone()) / previous * lit(100.0))
}

/// Growth against the previous row, in row order. Gaps between decades are not interpolated.
pub fn decade_growth(data: &DataFrame, value_column: &str) -> Result<DataFrame> {
    require_numeric(data, value_column, "decade_growth")?;
    Ok(data
        .clone()
        .lazy()
        .with_column(percent_change(value_column).alias(growth_column(value_column)))
        .collect()?)
}

/// Year-over-year growth of `value_column` within each `partition_column` value, rows sorted
/// by partition and year. An existing `<value_column>_growth_prct` column is kept as is.
pub fn annual_growth(
    data: &DataFrame,
    value_column: &str,
    partition_column: &str,
) -> Result<DataFrame> {
    let name = growth_column(value_column);
    if data.column(&name).is_ok() {
        require_numeric(data, &name, "annual_growth")?;
        return Ok(data.clone());
    }
    require_numeric(data, value_column, "annual_growth")?;
    require_key(data, partition_column, "annual_growth")?;

    let ordered = sorted(data, &[partition_column, YEAR])?;
    Ok(ordered
        .lazy()
        .with_column(
            percent_change(value_column)
                .over([col(partition_column)])
                .alias(name.as_str()),
        )
        .collect()?)
}

pub fn median_growth_by_decade(data: &DataFrame, growth_column: &str) -> Result<DataFrame> {
    let with_decades = with_decade(data)?;
    aggregate_by_group(
        &with_decades,
        &[DECADE],
        &[growth_column],
        Aggregation::Median,
        GroupOrder::Sorted,
    )
}

/// Rounds to two decimals and appends the severity `color`.
pub fn growth_bands(
    data: &DataFrame,
    growth_column: &str,
    scale: &SeverityScale,
) -> Result<DataFrame> {
    let growth: Vec<Option<f64>> = float_values(data, growth_column, "growth_bands")?
        .into_iter()
        .map(|value| value.map(|value| round_to(value, 2)))
        .collect();
    let colors: Vec<Option<&str>> = growth
        .iter()
        .map(|value| value.map(|value| bucket_color(value, scale)))
        .collect();

    let mut output = data.clone();
    output.with_column(Series::new(growth_column.into(), growth))?;
    output.with_column(Series::new("color".into(), colors))?;
    Ok(output)
}
