use polars::prelude::*;

use crate::aggregate::{sum_by_group, sum_by_group_ordered, with_decade, GroupOrder};
use crate::columns::{
    CO2_INCLUDING_LUC, CO2_INCLUDING_LUC_PER_GDP, CONTINENT, DECADE, ISO_CODE,
    SHARE_GLOBAL_CO2_INCLUDING_LUC, SOURCE_COLUMNS, TERRITORY, YEAR,
};
use crate::config::DashboardConfig;
use crate::derived::Derived;
use crate::error::Result;
use crate::filters::{
    drop_missing, exclude_value, filter_above, filter_by_decade, filter_by_territories,
    filter_by_territory,
};
use crate::frame::{float_values, round_to};
use crate::reshape::melt_sources;

use super::{ChartKind, Panel};

const MARKER_SCALE: f64 = 2.0;

/// Rows of real countries: the "Unknown" continent sentinel removed and an ISO code present.
fn countries(data: &DataFrame, config: &DashboardConfig) -> Result<Derived> {
    exclude_value(data, CONTINENT, &config.unknown_continent)?
        .and_then(|df| drop_missing(df, &[ISO_CODE]))
}

fn with_marker_size(data: &DataFrame, value_column: &str) -> Result<DataFrame> {
    Ok(data
        .clone()
        .lazy()
        .with_column((col(value_column).abs() * lit(MARKER_SCALE)).alias("marker_size"))
        .collect()?)
}

fn share_comparison(data: &DataFrame, territories: &[String]) -> Result<Derived> {
    filter_by_territories(data, territories)?
        .map(|df| Ok(df.select([YEAR, TERRITORY, SHARE_GLOBAL_CO2_INCLUDING_LUC])?))
}

fn share_title(territories: &[String]) -> String {
    format!("Share of global CO₂ emissions: {}", territories.join(" vs "))
}

pub(super) fn emissions_by_region(data: &DataFrame, config: &DashboardConfig) -> Result<Vec<Panel>> {
    let countries = countries(data, config)?;

    let by_continent = exclude_value(data, CONTINENT, &config.unknown_continent)?.map(|df| {
        sum_by_group_ordered(
            &with_decade(df)?,
            &[DECADE, CONTINENT],
            CO2_INCLUDING_LUC,
            GroupOrder::Sorted,
        )
    })?;

    let map_frames = countries.map(|df| {
        let grouped = sum_by_group(
            df,
            &[YEAR, CONTINENT, ISO_CODE, TERRITORY],
            CO2_INCLUDING_LUC,
        )?;
        with_marker_size(&grouped, CO2_INCLUDING_LUC)
    })?;

    let decade = config.breakdown_decade;
    let breakdown = countries
        .and_then(|df| filter_by_decade(df, decade))?
        .map(|df| sum_by_group(df, &[CONTINENT, ISO_CODE, TERRITORY], CO2_INCLUDING_LUC))?
        .and_then(|df| filter_above(df, CO2_INCLUDING_LUC, 0.0))?;

    let shares = share_comparison(data, &config.region_share_territories)?;

    Ok(vec![
        Panel::new(
            "CO₂ emissions by continent over decades",
            ChartKind::Bar,
            by_continent,
        ),
        Panel::new(
            "CO₂ emissions by country over time",
            ChartKind::ScatterGeo,
            map_frames,
        ),
        Panel::new(
            format!("CO₂ emissions by continent and country ({decade}s)"),
            ChartKind::Sunburst,
            breakdown,
        ),
        Panel::new(
            share_title(&config.region_share_territories),
            ChartKind::Line,
            shares,
        ),
    ])
}

pub(super) fn emissions_per_gdp(data: &DataFrame, config: &DashboardConfig) -> Result<Vec<Panel>> {
    let decade = config.breakdown_decade;
    let intensity = countries(data, config)?
        .and_then(|df| filter_by_decade(df, decade))?
        .map(|df| {
            let grouped = sum_by_group(
                df,
                &[CONTINENT, ISO_CODE, TERRITORY],
                CO2_INCLUDING_LUC_PER_GDP,
            )?;
            scale_measure(&grouped, CO2_INCLUDING_LUC_PER_GDP, config.gdp_scale)
        })?
        .and_then(|df| filter_above(df, CO2_INCLUDING_LUC_PER_GDP, config.gdp_min_value))?
        .map(|df| round_measure(df, CO2_INCLUDING_LUC_PER_GDP))?
        .with_empty_reason("No CO₂ per GDP data available for this period");

    let shares = share_comparison(data, &config.gdp_share_territories)?;

    let sources = filter_by_territory(data, &config.gdp_focus_territory)?
        .map(|df| melt_sources(df, YEAR, &SOURCE_COLUMNS))?;

    Ok(vec![
        Panel::new(
            format!("CO₂ emissions per GDP ({decade}s)"),
            ChartKind::Sunburst,
            intensity,
        ),
        Panel::new(
            share_title(&config.gdp_share_territories),
            ChartKind::Line,
            shares,
        ),
        Panel::new(
            format!("{}: CO₂ emissions by source", config.gdp_focus_territory),
            ChartKind::Line,
            sources,
        ),
    ])
}

fn scale_measure(data: &DataFrame, column: &str, factor: f64) -> Result<DataFrame> {
    Ok(data
        .clone()
        .lazy()
        .with_column((col(column) * lit(factor)).alias(column))
        .collect()?)
}

fn round_measure(data: &DataFrame, column: &str) -> Result<DataFrame> {
    let rounded: Vec<Option<f64>> = float_values(data, column, "round_measure")?
        .into_iter()
        .map(|value| value.map(|value| round_to(value, 0)))
        .collect();
    let mut output = data.clone();
    output.with_column(Series::new(column.into(), rounded))?;
    Ok(output)
}
