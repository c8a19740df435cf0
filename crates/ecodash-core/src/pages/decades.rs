use polars::prelude::DataFrame;

use crate::aggregate::decade_totals;
use crate::columns::{growth_column, CO2, TERRITORY};
use crate::config::DashboardConfig;
use crate::derived::Derived;
use crate::error::Result;
use crate::events::annotate_events;
use crate::filters::filter_by_territory;
use crate::growth::{annual_growth, decade_growth, growth_bands, median_growth_by_decade};

use super::{ChartKind, Panel};

pub(super) fn events_and_impacts(data: &DataFrame, config: &DashboardConfig) -> Result<Vec<Panel>> {
    let scope = match &config.events_territory {
        Some(territory) => filter_by_territory(data, territory)?,
        None => Derived::from_frame(data.clone(), || "dataset has no rows".to_string()),
    };

    let growth_name = growth_column(CO2);
    let by_decade = scope
        .map(|df| decade_totals(df, CO2, config.growth_aggregation))?
        .map(|df| decade_growth(df, CO2))?;

    let annotations = match by_decade.rows() {
        Some(df) => annotate_events(df, CO2, &config.events)?,
        None => Vec::new(),
    };

    let bands = scope.map(|df| {
        let annual = annual_growth(df, CO2, TERRITORY)?;
        let medians = median_growth_by_decade(&annual, &growth_name)?;
        growth_bands(&medians, &growth_name, &config.severity)
    })?;

    Ok(vec![
        Panel::new(
            "Evolution of CO₂ emissions and key events by decade",
            ChartKind::Line,
            by_decade,
        )
        .with_annotations(annotations),
        Panel::new("Median CO₂ growth by decade", ChartKind::Bar, bands),
    ])
}
