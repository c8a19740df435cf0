use ecodash_core::aggregate::Aggregation;
use ecodash_core::config::{ConfigError, DashboardConfig};
use ecodash_core::events::HistoricalEvent;

#[test]
fn empty_file_yields_defaults() {
    let config = DashboardConfig::from_toml_str("").unwrap();
    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.world_territory, "World");
    assert_eq!(config.year_bounds.default, 2020);
    assert_eq!(config.events.len(), 6);
    assert_eq!(config.severity.bands().len(), 10);
}

#[test]
fn overrides_are_merged_over_defaults() {
    let toml = r##"
focus_territory = "Portugal"
events_territory = "World"
growth_aggregation = "mean"
breakdown_decade = 2000

[year_bounds]
min = 1900
max = 2022
default = 2000

[[events]]
decade = 1970
label = "Oil crisis"

[[severity]]
upper = 0.0
color = "#0000ff"

[[severity]]
color = "#ff0000"
"##;
    let config = DashboardConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.focus_territory, "Portugal");
    assert_eq!(config.events_territory.as_deref(), Some("World"));
    assert_eq!(config.growth_aggregation, Aggregation::Mean);
    assert_eq!(config.year_bounds.clamp(2050), 2022);
    assert_eq!(config.events, vec![HistoricalEvent::new(1970, "Oil crisis")]);
    assert_eq!(config.severity.bands().len(), 2);
    assert_eq!(config.world_territory, "World");
}

#[test]
fn unknown_keys_are_rejected() {
    let result = DashboardConfig::from_toml_str("focus_country = \"Spain\"");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn inconsistent_values_are_invalid() {
    let cases = [
        "[year_bounds]\nmin = 2000\nmax = 1900\ndefault = 1950",
        "[year_bounds]\nmin = 1850\nmax = 2025\ndefault = 2030",
        "breakdown_decade = 2015",
        "gdp_scale = 0.0",
        "[[events]]\ndecade = 1914\nlabel = \"War\"",
        "[[severity]]\nupper = 1.0\ncolor = \"#000000\"",
        "[[severity]]\nupper = 2.0\ncolor = \"#000000\"\n[[severity]]\nupper = 1.0\ncolor = \"#111111\"\n[[severity]]\ncolor = \"#222222\"",
    ];
    for case in cases {
        let result = DashboardConfig::from_toml_str(case);
        assert!(
            matches!(result, Err(ConfigError::Invalid(_))),
            "expected invalid config for {case:?}"
        );
    }
}

#[test]
fn missing_file_reports_the_path() {
    let path = std::path::Path::new("/nonexistent/ecodash.toml");
    match DashboardConfig::load(path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an IO error, got {other:?}"),
    }
}

#[test]
fn config_serializes_with_snake_case_aggregation() {
    let json = serde_json::to_value(DashboardConfig::default()).unwrap();
    assert_eq!(json["growth_aggregation"], "sum");
    assert_eq!(json["severity"][0]["color"], "#102742");
    assert_eq!(json["severity"][9]["upper"], serde_json::Value::Null);
}
