use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use ecodash_core::events::EventAnnotation;
use ecodash_core::pages::{page_descriptor, ChartKind, Page, PageDescriptor, PageOutput};
use polars::prelude::*;
use serde::Serialize;
use serde_json::{Map, Number, Value};

fn float_json(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        other => other.to_string(),
    }
}

pub fn cell_json(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(flag) => Value::Bool(*flag),
        AnyValue::String(text) => Value::String(text.to_string()),
        AnyValue::StringOwned(text) => Value::String(text.to_string()),
        AnyValue::Int32(number) => Value::from(*number),
        AnyValue::Int64(number) => Value::from(*number),
        AnyValue::UInt32(number) => Value::from(*number),
        AnyValue::UInt64(number) => Value::from(*number),
        AnyValue::Float32(number) => float_json(f64::from(*number)),
        AnyValue::Float64(number) => float_json(*number),
        other => Value::String(other.to_string()),
    }
}

/// One JSON object per row, keyed by column name.
pub fn frame_rows(df: &DataFrame) -> Result<Vec<Map<String, Value>>> {
    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut object = Map::new();
        for column in df.get_columns() {
            let value = column.as_materialized_series().get(row)?;
            object.insert(column.name().to_string(), cell_json(&value));
        }
        rows.push(object);
    }
    Ok(rows)
}

/// Terminal table of the first `limit` rows.
pub fn frame_table(df: &DataFrame, limit: usize) -> Result<Table> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            df.get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>(),
        );

    for row in 0..df.height().min(limit) {
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            cells.push(cell_text(&column.as_materialized_series().get(row)?));
        }
        table.add_row(cells);
    }
    Ok(table)
}

pub fn page_catalog_table(descriptors: &[PageDescriptor]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Page", "Title", "Question"]);
    for descriptor in descriptors {
        table.add_row(vec![
            descriptor.page.slug(),
            descriptor.title,
            descriptor.question,
        ]);
    }
    table
}

/// Text rendering of every panel of a page, each capped at `limit` rows.
pub fn page_text(output: &PageOutput, limit: usize) -> Result<String> {
    let descriptor = page_descriptor(output.page);
    let mut text = format!("{} ({})\n{}\n", descriptor.title, output.year, descriptor.question);

    for panel in &output.panels {
        text.push_str(&format!("\n{} [{:?}]\n", panel.title, panel.chart));
        match panel.data.rows() {
            Some(df) => {
                text.push_str(&frame_table(df, limit)?.to_string());
                text.push('\n');
                if df.height() > limit {
                    text.push_str(&format!("... {} more rows\n", df.height() - limit));
                }
            }
            None => {
                let reason = panel.data.empty_reason().unwrap_or_default();
                text.push_str(&format!("No data available: {reason}\n"));
            }
        }
        for annotation in &panel.annotations {
            let value = annotation
                .value
                .map(|value| value.to_string())
                .unwrap_or_default();
            text.push_str(&format!(
                "  {}s: {} ({value})\n",
                annotation.decade, annotation.label
            ));
        }
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
pub struct PanelJson<'a> {
    pub title: &'a str,
    pub chart: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<&'a str>,
    pub rows: Vec<Map<String, Value>>,
    pub annotations: &'a [EventAnnotation],
}

#[derive(Debug, Serialize)]
pub struct PageJson<'a> {
    pub page: Page,
    pub title: &'static str,
    pub year: i64,
    pub panels: Vec<PanelJson<'a>>,
}

pub fn page_json(output: &PageOutput) -> Result<PageJson<'_>> {
    let panels = output
        .panels
        .iter()
        .map(|panel| -> Result<PanelJson<'_>> {
            let rows = match panel.data.rows() {
                Some(df) => frame_rows(df)?,
                None => Vec::new(),
            };
            Ok(PanelJson {
                title: &panel.title,
                chart: panel.chart,
                empty_reason: panel.data.empty_reason(),
                rows,
                annotations: &panel.annotations,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PageJson {
        page: output.page,
        title: page_descriptor(output.page).title,
        year: output.year,
        panels,
    })
}
