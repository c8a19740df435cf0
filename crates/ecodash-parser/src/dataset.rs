use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use csv::StringRecord;
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ParserError;
use crate::schema::{dataset_columns, ColumnKind, ColumnSpec, CONTINENT, TERRITORY, YEAR};
use crate::values::{parse_continent, parse_name, parse_optional_f64, parse_optional_name, parse_year};

/// The loaded emissions table: one row per territory and year.
///
/// The frame is treated as read-only once loaded; every derived table is built from a
/// borrowed reference to it.
#[derive(Debug, Clone)]
pub struct EmissionsDataset {
    pub df: DataFrame,
    pub content_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub territories: usize,
    pub continents: Vec<String>,
    pub first_year: Option<i64>,
    pub last_year: Option<i64>,
    pub columns: Vec<String>,
    pub content_hash: String,
}

impl EmissionsDataset {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    pub fn summary(&self) -> Result<DatasetSummary, ParserError> {
        let territory = self.df.column(TERRITORY)?.str()?;
        let continent = self.df.column(CONTINENT)?.str()?;
        let year = self.df.column(YEAR)?.i64()?;

        let territories: BTreeSet<&str> = territory.into_iter().flatten().collect();
        let continents: BTreeSet<&str> = continent.into_iter().flatten().collect();
        let first_year = year.into_iter().flatten().min();
        let last_year = year.into_iter().flatten().max();

        Ok(DatasetSummary {
            rows: self.df.height(),
            territories: territories.len(),
            continents: continents.into_iter().map(str::to_string).collect(),
            first_year,
            last_year,
            columns: self
                .df
                .get_columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
            content_hash: self.content_hash.clone(),
        })
    }
}

pub fn load_emissions_file(path: &Path) -> Result<EmissionsDataset, ParserError> {
    let bytes = fs::read(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_emissions_csv(&bytes)?;
    info!(
        path = %path.display(),
        rows = dataset.height(),
        hash = %dataset.content_hash,
        "Loaded emissions dataset"
    );
    Ok(dataset)
}

pub fn parse_emissions_csv(content: &[u8]) -> Result<EmissionsDataset, ParserError> {
    let content_hash = blake3::hash(content).to_hex().to_string();
    parse_with_hash(content, content_hash)
}

pub(crate) fn parse_with_hash(
    content: &[u8],
    content_hash: String,
) -> Result<EmissionsDataset, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content);

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::MissingHeader)?
        .map_err(|source| ParserError::Csv { source })?;
    let layout = HeaderLayout::resolve(&header)?;

    let mut buffers: Vec<ColumnBuffer> = layout
        .columns
        .iter()
        .map(|(spec, _)| ColumnBuffer::for_kind(spec.kind))
        .collect();

    for (row_idx, record) in records.enumerate() {
        let record = record.map_err(|source| ParserError::Csv { source })?;
        let line_index = row_idx + 2; // header is line 1

        for ((spec, position), buffer) in layout.columns.iter().zip(buffers.iter_mut()) {
            let value = record.get(*position).unwrap_or("");
            buffer.push(spec, value, line_index)?;
        }
    }

    let columns = layout
        .columns
        .iter()
        .zip(buffers)
        .map(|((spec, _), buffer)| buffer.into_column(spec.name))
        .collect::<Vec<Column>>();
    let df = DataFrame::new(columns)?;

    Ok(EmissionsDataset { df, content_hash })
}

struct HeaderLayout {
    columns: Vec<(ColumnSpec, usize)>,
}

impl HeaderLayout {
    fn resolve(header: &StringRecord) -> Result<Self, ParserError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            let name = name.trim();
            if positions.insert(name, idx).is_some() {
                return Err(ParserError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
        }

        let mut columns = Vec::with_capacity(dataset_columns().len());
        for spec in dataset_columns() {
            match positions.remove(spec.name) {
                Some(idx) => columns.push((*spec, idx)),
                None if spec.required => {
                    return Err(ParserError::MissingColumn { column: spec.name })
                }
                None => debug!(column = spec.name, "Optional column absent"),
            }
        }

        for ignored in positions.keys() {
            debug!(column = %ignored, "Ignoring column outside the dataset schema");
        }

        Ok(Self { columns })
    }
}

enum ColumnBuffer {
    Names(Vec<String>),
    OptionalNames(Vec<Option<String>>),
    Years(Vec<i64>),
    Measures(Vec<Option<f64>>),
}

impl ColumnBuffer {
    fn for_kind(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Name | ColumnKind::Continent => ColumnBuffer::Names(Vec::new()),
            ColumnKind::OptionalName => ColumnBuffer::OptionalNames(Vec::new()),
            ColumnKind::Year => ColumnBuffer::Years(Vec::new()),
            ColumnKind::Measure => ColumnBuffer::Measures(Vec::new()),
        }
    }

    fn push(&mut self, spec: &ColumnSpec, value: &str, line_index: usize) -> Result<(), ParserError> {
        match (self, spec.kind) {
            (ColumnBuffer::Names(values), ColumnKind::Continent) => {
                values.push(parse_continent(value));
            }
            (ColumnBuffer::Names(values), _) => {
                values.push(parse_name(value, line_index, spec.name)?);
            }
            (ColumnBuffer::OptionalNames(values), _) => {
                values.push(parse_optional_name(value));
            }
            (ColumnBuffer::Years(values), _) => {
                values.push(parse_year(value, line_index, spec.name)?);
            }
            (ColumnBuffer::Measures(values), _) => {
                values.push(parse_optional_f64(value, line_index, spec.name)?);
            }
        }
        Ok(())
    }

    fn into_column(self, name: &'static str) -> Column {
        match self {
            ColumnBuffer::Names(values) => {
                let utf8: Vec<&str> = values.iter().map(String::as_str).collect();
                Series::new(name.into(), utf8).into()
            }
            ColumnBuffer::OptionalNames(values) => {
                let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
                Series::new(name.into(), utf8).into()
            }
            ColumnBuffer::Years(values) => Series::new(name.into(), values).into(),
            ColumnBuffer::Measures(values) => Series::new(name.into(), values).into(),
        }
    }
}
