pub mod cache;
pub mod dataset;
pub mod errors;
pub mod schema;
mod values;

pub use cache::DatasetCache;
pub use dataset::{load_emissions_file, parse_emissions_csv, DatasetSummary, EmissionsDataset};
pub use errors::ParserError;
pub use schema::{dataset_columns, ColumnKind, ColumnSpec, UNKNOWN_CONTINENT};

#[cfg(test)]
mod tests;
