use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::frame::{require_key, require_numeric};

const ROW: &str = "__row";
const POSITION: &str = "__position";

/// Output column names for [`melt_sources_with`].
#[derive(Debug, Clone)]
pub struct MeltOptions {
    pub variable_name: String,
    pub value_name: String,
}

impl Default for MeltOptions {
    fn default() -> Self {
        Self {
            variable_name: "source".to_string(),
            value_name: "value".to_string(),
        }
    }
}

pub fn melt_sources(data: &DataFrame, id_column: &str, value_columns: &[&str]) -> Result<DataFrame> {
    melt_sources_with(data, id_column, value_columns, &MeltOptions::default())
}

/// Wide source columns to `(id, source, value)` rows, ordered by input row and then by the
/// order of `value_columns`. Missing values stay missing.
pub fn melt_sources_with(
    data: &DataFrame,
    id_column: &str,
    value_columns: &[&str],
    options: &MeltOptions,
) -> Result<DataFrame> {
    require_key(data, id_column, "melt_sources")?;
    for name in value_columns {
        require_numeric(data, name, "melt_sources")?;
    }
    if value_columns.is_empty() {
        return Err(PipelineError::Processing(
            "melt_sources needs at least one value column".to_string(),
        ));
    }

    let indexed = data.clone().lazy().with_row_index(ROW, None);
    let parts: Vec<LazyFrame> = value_columns
        .iter()
        .enumerate()
        .map(|(position, name)| {
            indexed.clone().select([
                col(ROW),
                lit(position as u32).alias(POSITION),
                col(id_column),
                lit(*name).alias(options.variable_name.as_str()),
                col(*name)
                    .cast(DataType::Float64)
                    .alias(options.value_name.as_str()),
            ])
        })
        .collect();

    let df = concat(parts, UnionArgs::default())?
        .sort_by_exprs(
            [col(ROW), col(POSITION)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .select([
            col(id_column),
            col(options.variable_name.as_str()),
            col(options.value_name.as_str()),
        ])
        .collect()?;

    debug!(
        input_rows = data.height(),
        rows = df.height(),
        "Melted source columns"
    );
    Ok(df)
}

/// Totals each sector column over all rows as `(sector, emissions)`.
pub fn sector_totals(data: &DataFrame, sector_columns: &[&str]) -> Result<DataFrame> {
    for name in sector_columns {
        require_numeric(data, name, "sector_totals")?;
    }
    let sums = data
        .clone()
        .lazy()
        .select(
            sector_columns
                .iter()
                .map(|name| col(*name).cast(DataType::Float64).sum())
                .collect::<Vec<_>>(),
        )
        .collect()?;

    let mut totals = Vec::with_capacity(sector_columns.len());
    for name in sector_columns {
        totals.push(sums.column(name)?.f64()?.get(0).unwrap_or(0.0));
    }

    Ok(DataFrame::new(vec![
        Series::new("sector".into(), sector_columns.to_vec()).into(),
        Series::new("emissions".into(), totals).into(),
    ])?)
}
