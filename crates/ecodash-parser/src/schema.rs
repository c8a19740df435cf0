/// Sentinel continent carried by aggregate rows such as "World" or a continent total.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

pub const TERRITORY: &str = "territory";
pub const ISO_CODE: &str = "iso_code";
pub const CONTINENT: &str = "continent";
pub const YEAR: &str = "year";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Non-empty string.
    Name,
    /// String that may be empty; empty cells load as missing.
    OptionalName,
    /// String where empty cells load as [`UNKNOWN_CONTINENT`].
    Continent,
    /// Integer calendar year.
    Year,
    /// Float measurement; blank and `NA`/`nan` cells load as missing.
    Measure,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required: false,
    }
}

static DATASET_COLUMNS: [ColumnSpec; 20] = [
    required(TERRITORY, ColumnKind::Name),
    required(ISO_CODE, ColumnKind::OptionalName),
    required(CONTINENT, ColumnKind::Continent),
    required(YEAR, ColumnKind::Year),
    required("co2", ColumnKind::Measure),
    required("co2_including_luc", ColumnKind::Measure),
    required("cement_co2", ColumnKind::Measure),
    required("coal_co2", ColumnKind::Measure),
    required("flaring_co2", ColumnKind::Measure),
    required("gas_co2", ColumnKind::Measure),
    required("oil_co2", ColumnKind::Measure),
    required("land_use_change_co2", ColumnKind::Measure),
    required("co2_including_luc_per_gdp", ColumnKind::Measure),
    required("share_global_co2_including_luc", ColumnKind::Measure),
    required("temperature_change_from_ghg", ColumnKind::Measure),
    required("temperature_change_from_co2", ColumnKind::Measure),
    required("temperature_change_from_ch4", ColumnKind::Measure),
    required("temperature_change_from_n2o", ColumnKind::Measure),
    optional("cumulative_co2_including_luc", ColumnKind::Measure),
    optional("co2_growth_prct", ColumnKind::Measure),
];

/// Columns understood by the loader, in the order they appear in the loaded frame.
pub fn dataset_columns() -> &'static [ColumnSpec] {
    &DATASET_COLUMNS
}
