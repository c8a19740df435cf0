use polars::prelude::*;
use tracing::debug;

use crate::columns::{DECADE, TERRITORY, YEAR};
use crate::derived::Derived;
use crate::error::Result;
use crate::frame::{decade_expr, require_integer, require_numeric, require_text};

fn select_rows(
    data: &DataFrame,
    predicate: Expr,
    operation: &'static str,
    reason: impl FnOnce() -> String,
) -> Result<Derived> {
    let selected = data.clone().lazy().filter(predicate).collect()?;
    debug!(
        operation,
        input_rows = data.height(),
        rows = selected.height(),
        "Selected rows"
    );
    Ok(Derived::from_frame(selected, reason))
}

/// Exact, case-sensitive match.
pub fn filter_by_territory(data: &DataFrame, name: &str) -> Result<Derived> {
    require_text(data, TERRITORY, "filter_by_territory")?;
    select_rows(
        data,
        col(TERRITORY).eq(lit(name)),
        "filter_by_territory",
        || format!("no rows for territory '{name}'"),
    )
}

pub fn filter_by_territories<S: AsRef<str>>(data: &DataFrame, names: &[S]) -> Result<Derived> {
    require_text(data, TERRITORY, "filter_by_territories")?;
    let predicate = names
        .iter()
        .map(|name| col(TERRITORY).eq(lit(name.as_ref())))
        .reduce(|left, right| left.or(right))
        .unwrap_or_else(|| lit(false));
    select_rows(data, predicate, "filter_by_territories", || {
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        format!("no rows for territories {}", names.join(", "))
    })
}

/// The caller is responsible for clamping the slider value.
pub fn filter_by_year_range(data: &DataFrame, max_year: i64) -> Result<Derived> {
    require_integer(data, YEAR, "filter_by_year_range")?;
    select_rows(
        data,
        col(YEAR).lt_eq(lit(max_year)),
        "filter_by_year_range",
        || format!("no rows up to year {max_year}"),
    )
}

pub fn filter_by_year(data: &DataFrame, year: i64) -> Result<Derived> {
    require_integer(data, YEAR, "filter_by_year")?;
    select_rows(data, col(YEAR).eq(lit(year)), "filter_by_year", || {
        format!("no rows for year {year}")
    })
}

/// Uses the `decade` column when present, `year` otherwise.
pub fn filter_by_decade(data: &DataFrame, decade: i64) -> Result<Derived> {
    let bucket = if data.column(DECADE).is_ok() {
        require_integer(data, DECADE, "filter_by_decade")?;
        col(DECADE)
    } else {
        require_integer(data, YEAR, "filter_by_decade")?;
        decade_expr(YEAR)
    };
    select_rows(data, bucket.eq(lit(decade)), "filter_by_decade", || {
        format!("no rows in the {decade}s")
    })
}

/// Missing cells are kept.
pub fn exclude_value(data: &DataFrame, column: &str, value: &str) -> Result<Derived> {
    require_text(data, column, "exclude_value")?;
    let predicate = col(column).neq(lit(value)).or(col(column).is_null());
    select_rows(data, predicate, "exclude_value", || {
        format!("every row has {column} = '{value}'")
    })
}

pub fn drop_missing(data: &DataFrame, columns: &[&str]) -> Result<Derived> {
    for name in columns {
        data.column(name)?;
    }
    let predicate = columns
        .iter()
        .map(|name| col(*name).is_not_null())
        .reduce(|left, right| left.and(right))
        .unwrap_or_else(|| lit(true));
    select_rows(data, predicate, "drop_missing", || {
        format!("no rows with values for {}", columns.join(", "))
    })
}

/// Strictly greater; missing values never pass.
pub fn filter_above(data: &DataFrame, column: &str, threshold: f64) -> Result<Derived> {
    require_numeric(data, column, "filter_above")?;
    let predicate = col(column).cast(DataType::Float64).gt(lit(threshold));
    select_rows(data, predicate, "filter_above", || {
        format!("no rows with {column} above {threshold}")
    })
}
