use polars::prelude::*;

use crate::error::{PipelineError, Result};

fn unsupported(column: &Column, operation: &'static str) -> PipelineError {
    PipelineError::UnsupportedColumnType {
        column: column.name().to_string(),
        dtype: column.dtype().to_string(),
        operation,
    }
}

fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn is_numeric(dtype: &DataType) -> bool {
    is_integer(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

pub(crate) fn require_text(df: &DataFrame, name: &str, operation: &'static str) -> Result<()> {
    let column = df.column(name)?;
    if column.dtype() == &DataType::String {
        Ok(())
    } else {
        Err(unsupported(column, operation))
    }
}

pub(crate) fn require_integer(df: &DataFrame, name: &str, operation: &'static str) -> Result<()> {
    let column = df.column(name)?;
    if is_integer(column.dtype()) {
        Ok(())
    } else {
        Err(unsupported(column, operation))
    }
}

pub(crate) fn require_numeric(df: &DataFrame, name: &str, operation: &'static str) -> Result<()> {
    let column = df.column(name)?;
    if is_numeric(column.dtype()) {
        Ok(())
    } else {
        Err(unsupported(column, operation))
    }
}

/// Grouping and partition keys are either text or integer columns.
pub(crate) fn require_key(df: &DataFrame, name: &str, operation: &'static str) -> Result<()> {
    let column = df.column(name)?;
    if column.dtype() == &DataType::String || is_integer(column.dtype()) {
        Ok(())
    } else {
        Err(unsupported(column, operation))
    }
}

pub(crate) fn float_values(
    df: &DataFrame,
    name: &str,
    operation: &'static str,
) -> Result<Vec<Option<f64>>> {
    require_numeric(df, name, operation)?;
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

pub(crate) fn int_values(
    df: &DataFrame,
    name: &str,
    operation: &'static str,
) -> Result<Vec<Option<i64>>> {
    require_integer(df, name, operation)?;
    let cast = df.column(name)?.cast(&DataType::Int64)?;
    Ok(cast.i64()?.into_iter().collect())
}

/// Year floored to its decade bucket: 1987 -> 1980, -5 -> -10.
pub(crate) fn decade_expr(year_column: &str) -> Expr {
    (col(year_column)
        .cast(DataType::Int64)
        .floor_div(lit(10i64))
        * lit(10i64))
    .alias(crate::columns::DECADE)
}

/// Stable ascending sort; missing keys sort first.
pub(crate) fn sorted(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let by: Vec<Expr> = columns.iter().map(|name| col(*name)).collect();
    Ok(df
        .clone()
        .lazy()
        .sort_by_exprs(by, SortMultipleOptions::default().with_maintain_order(true))
        .collect()?)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
