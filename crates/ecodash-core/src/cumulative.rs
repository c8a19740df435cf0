use polars::prelude::*;

use crate::columns::cumulative_column;
use crate::error::Result;
use crate::frame::{require_key, require_numeric};

fn running_total(value_column: &str) -> Expr {
    col(value_column)
        .cast(DataType::Float64)
        .fill_null(lit(0.0))
        .cum_sum(false)
}

/// Appends `cumulative_<value_column>`, the running total in row order. Missing values add
/// nothing; rows are expected to be sorted by year already.
pub fn cumulative_sum(data: &DataFrame, value_column: &str) -> Result<DataFrame> {
    require_numeric(data, value_column, "cumulative_sum")?;
    Ok(data
        .clone()
        .lazy()
        .with_column(running_total(value_column).alias(cumulative_column(value_column)))
        .collect()?)
}

/// A separate running total per value of `partition_column`, still in row order.
pub fn cumulative_sum_within(
    data: &DataFrame,
    value_column: &str,
    partition_column: &str,
) -> Result<DataFrame> {
    require_numeric(data, value_column, "cumulative_sum_within")?;
    require_key(data, partition_column, "cumulative_sum_within")?;
    Ok(data
        .clone()
        .lazy()
        .with_column(
            running_total(value_column)
                .over([col(partition_column)])
                .alias(cumulative_column(value_column)),
        )
        .collect()?)
}
