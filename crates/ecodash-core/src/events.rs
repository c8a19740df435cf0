use serde::{Deserialize, Serialize};

use polars::prelude::DataFrame;

use crate::columns::DECADE;
use crate::error::Result;
use crate::frame::{float_values, int_values};

/// A labelled historical event pinned to a decade on the decade emissions chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub decade: i64,
    pub label: String,
}

impl HistoricalEvent {
    pub fn new(decade: i64, label: impl Into<String>) -> Self {
        Self {
            decade,
            label: label.into(),
        }
    }
}

pub fn default_events() -> Vec<HistoricalEvent> {
    vec![
        HistoricalEvent::new(1860, "First Industrial Revolution"),
        HistoricalEvent::new(1910, "World War I"),
        HistoricalEvent::new(1940, "World War II"),
        HistoricalEvent::new(1950, "Postwar Period"),
        HistoricalEvent::new(1990, "Kyoto Protocol"),
        HistoricalEvent::new(2020, "COVID-19"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAnnotation {
    pub decade: i64,
    pub label: String,
    pub value: Option<f64>,
}

/// Attaches each event to its decade row, carrying that row's `value_column`.
/// Events whose decade is absent from the table are skipped.
pub fn annotate_events(
    decade_table: &DataFrame,
    value_column: &str,
    events: &[HistoricalEvent],
) -> Result<Vec<EventAnnotation>> {
    let decades = int_values(decade_table, DECADE, "annotate_events")?;
    let values = float_values(decade_table, value_column, "annotate_events")?;

    Ok(events
        .iter()
        .filter_map(|event| {
            decades
                .iter()
                .position(|decade| *decade == Some(event.decade))
                .map(|row| EventAnnotation {
                    decade: event.decade,
                    label: event.label.clone(),
                    value: values[row],
                })
        })
        .collect())
}
