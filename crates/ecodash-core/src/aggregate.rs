use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::columns::{DECADE, YEAR};
use crate::error::Result;
use crate::frame::{decade_expr, require_integer, require_key, require_numeric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Missing values count as zero; an all-missing group sums to zero.
    #[default]
    Sum,
    Mean,
    Median,
}

impl Aggregation {
    pub fn expr(&self, column: &str) -> Expr {
        let values = col(column).cast(DataType::Float64);
        match self {
            Aggregation::Sum => values.sum(),
            Aggregation::Mean => values.mean(),
            Aggregation::Median => values.median(),
        }
        .alias(column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    #[default]
    FirstSeen,
    /// Ascending by key tuple; missing keys sort first.
    Sorted,
}

/// A frame that already has a `decade` column is returned unchanged.
pub fn with_decade(data: &DataFrame) -> Result<DataFrame> {
    if data.column(DECADE).is_ok() {
        return Ok(data.clone());
    }
    require_integer(data, YEAR, "with_decade")?;
    Ok(data.clone().lazy().with_column(decade_expr(YEAR)).collect()?)
}

pub fn sum_by_group(data: &DataFrame, group_keys: &[&str], value_column: &str) -> Result<DataFrame> {
    aggregate_by_group(
        data,
        group_keys,
        &[value_column],
        Aggregation::Sum,
        GroupOrder::FirstSeen,
    )
}

pub fn sum_by_group_ordered(
    data: &DataFrame,
    group_keys: &[&str],
    value_column: &str,
    order: GroupOrder,
) -> Result<DataFrame> {
    aggregate_by_group(data, group_keys, &[value_column], Aggregation::Sum, order)
}

/// One row per distinct key tuple: the key columns followed by the folded value columns.
pub fn aggregate_by_group(
    data: &DataFrame,
    group_keys: &[&str],
    value_columns: &[&str],
    aggregation: Aggregation,
    order: GroupOrder,
) -> Result<DataFrame> {
    for name in group_keys {
        require_key(data, name, "aggregate_by_group")?;
    }
    for name in value_columns {
        require_numeric(data, name, "aggregate_by_group")?;
    }

    let keys: Vec<Expr> = group_keys.iter().map(|name| col(*name)).collect();
    let folded: Vec<Expr> = value_columns
        .iter()
        .map(|name| aggregation.expr(name))
        .collect();

    let grouped = data.clone().lazy().group_by_stable(keys.clone()).agg(folded);
    let grouped = match order {
        GroupOrder::FirstSeen => grouped,
        GroupOrder::Sorted => grouped.sort_by_exprs(
            keys,
            SortMultipleOptions::default().with_maintain_order(true),
        ),
    };
    let df = grouped.collect()?;

    debug!(
        keys = ?group_keys,
        input_rows = data.height(),
        groups = df.height(),
        "Aggregated groups"
    );
    Ok(df)
}

pub fn decade_totals(
    data: &DataFrame,
    value_column: &str,
    aggregation: Aggregation,
) -> Result<DataFrame> {
    let with_decades = with_decade(data)?;
    aggregate_by_group(
        &with_decades,
        &[DECADE],
        &[value_column],
        aggregation,
        GroupOrder::Sorted,
    )
}
