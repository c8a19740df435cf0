//! Column names shared by the pipeline and the page builders.

pub use ecodash_parser::schema::{CONTINENT, ISO_CODE, TERRITORY, YEAR};

pub const DECADE: &str = "decade";

pub const CO2: &str = "co2";
pub const CO2_INCLUDING_LUC: &str = "co2_including_luc";
pub const CO2_INCLUDING_LUC_PER_GDP: &str = "co2_including_luc_per_gdp";
pub const SHARE_GLOBAL_CO2_INCLUDING_LUC: &str = "share_global_co2_including_luc";
pub const CUMULATIVE_CO2_INCLUDING_LUC: &str = "cumulative_co2_including_luc";
pub const TEMPERATURE_CHANGE_FROM_GHG: &str = "temperature_change_from_ghg";

/// Totals and per-source series plotted together on the source breakdown charts.
pub const SOURCE_COLUMNS: [&str; 8] = [
    "cement_co2",
    "co2",
    "co2_including_luc",
    "coal_co2",
    "flaring_co2",
    "gas_co2",
    "oil_co2",
    "land_use_change_co2",
];

/// Focus-territory chart lists the totals first.
pub const FOCUS_SOURCE_COLUMNS: [&str; 8] = [
    "co2",
    "co2_including_luc",
    "cement_co2",
    "coal_co2",
    "gas_co2",
    "oil_co2",
    "flaring_co2",
    "land_use_change_co2",
];

/// Individual emission sectors, without the totals.
pub const SECTOR_COLUMNS: [&str; 6] = [
    "cement_co2",
    "coal_co2",
    "flaring_co2",
    "gas_co2",
    "oil_co2",
    "land_use_change_co2",
];

pub fn growth_column(value_column: &str) -> String {
    format!("{value_column}_growth_prct")
}

pub fn cumulative_column(value_column: &str) -> String {
    format!("cumulative_{value_column}")
}
