use polars::prelude::DataFrame;

use crate::aggregate::{aggregate_by_group, Aggregation, GroupOrder};
use crate::columns::{
    CO2, CO2_INCLUDING_LUC, CONTINENT, CUMULATIVE_CO2_INCLUDING_LUC, SECTOR_COLUMNS,
    TEMPERATURE_CHANGE_FROM_GHG, TERRITORY, YEAR,
};
use crate::config::DashboardConfig;
use crate::correlation::{correlation_frame, correlation_with};
use crate::cumulative::cumulative_sum_within;
use crate::error::Result;
use crate::filters::{drop_missing, exclude_value, filter_by_territory};
use crate::frame::sorted;

use super::{ChartKind, Panel};

pub(super) fn co2_temperature(data: &DataFrame, config: &DashboardConfig) -> Result<Vec<Panel>> {
    let world = filter_by_territory(data, &config.world_territory)?;

    let yearly = world.map(|df| {
        aggregate_by_group(
            df,
            &[YEAR],
            &[CO2, TEMPERATURE_CHANGE_FROM_GHG],
            Aggregation::Mean,
            GroupOrder::Sorted,
        )
    })?;

    let sectors = world.map(|df| {
        let correlations = correlation_with(df, TEMPERATURE_CHANGE_FROM_GHG, &SECTOR_COLUMNS)?;
        correlation_frame(&correlations)
    })?;

    let cumulative = exclude_value(data, CONTINENT, &config.unknown_continent)?
        .map(|df| {
            if df.column(CUMULATIVE_CO2_INCLUDING_LUC).is_ok() {
                Ok(df.clone())
            } else {
                let ordered = sorted(df, &[TERRITORY, YEAR])?;
                cumulative_sum_within(&ordered, CO2_INCLUDING_LUC, TERRITORY)
            }
        })?
        .and_then(|df| drop_missing(df, &[CUMULATIVE_CO2_INCLUDING_LUC, TEMPERATURE_CHANGE_FROM_GHG]))?
        .map(|df| {
            Ok(df.select([
                TERRITORY,
                CONTINENT,
                YEAR,
                CUMULATIVE_CO2_INCLUDING_LUC,
                TEMPERATURE_CHANGE_FROM_GHG,
            ])?)
        })?;

    Ok(vec![
        Panel::new(
            "CO₂ emissions and temperature change over time",
            ChartKind::Line,
            yearly,
        ),
        Panel::new(
            "Correlation between sector emissions and temperature rise",
            ChartKind::Bar,
            sectors,
        ),
        Panel::new(
            "Cumulative CO₂ vs temperature change from GHG",
            ChartKind::Scatter,
            cumulative,
        ),
    ])
}
