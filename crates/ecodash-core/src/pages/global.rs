use polars::prelude::DataFrame;

use crate::columns::{
    cumulative_column, CO2, CO2_INCLUDING_LUC, FOCUS_SOURCE_COLUMNS, SECTOR_COLUMNS,
    SOURCE_COLUMNS, YEAR,
};
use crate::config::DashboardConfig;
use crate::cumulative::cumulative_sum;
use crate::error::Result;
use crate::filters::{filter_by_territory, filter_by_year, filter_by_year_range};
use crate::reshape::{melt_sources, sector_totals};

use super::{ChartKind, Panel};

pub(super) fn global_trend(
    data: &DataFrame,
    year: i64,
    config: &DashboardConfig,
) -> Result<Vec<Panel>> {
    let world = filter_by_territory(data, &config.world_territory)?
        .and_then(|df| filter_by_year_range(df, year))?;

    let by_source = world.map(|df| melt_sources(df, YEAR, &SOURCE_COLUMNS))?;

    let totals = world.map(|df| Ok(df.select([YEAR, CO2, CO2_INCLUDING_LUC])?))?;

    let by_sector = world
        .and_then(|df| filter_by_year(df, year))?
        .map(|df| sector_totals(df, &SECTOR_COLUMNS))?;

    let cumulative_name = cumulative_column(CO2);
    let cumulative = world.map(|df| {
        let with_total = cumulative_sum(df, CO2)?;
        Ok(with_total.select([YEAR, cumulative_name.as_str()])?)
    })?;

    Ok(vec![
        Panel::new("Global emissions by source", ChartKind::Line, by_source),
        Panel::new("Total vs including land-use change", ChartKind::Area, totals),
        Panel::new(format!("Emissions by sector in {year}"), ChartKind::Bar, by_sector),
        Panel::new("Historical cumulative CO₂ emissions", ChartKind::Line, cumulative),
    ])
}

pub(super) fn focus_territory(data: &DataFrame, config: &DashboardConfig) -> Result<Vec<Panel>> {
    let sources = filter_by_territory(data, &config.focus_territory)?
        .map(|df| melt_sources(df, YEAR, &FOCUS_SOURCE_COLUMNS))?;

    Ok(vec![Panel::new(
        format!("CO₂ emissions in {}", config.focus_territory),
        ChartKind::Line,
        sources,
    )])
}
