use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One severity band: values strictly below `upper` (and not caught by an earlier band) map to
/// `color`. The last band has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    #[serde(default)]
    pub upper: Option<f64>,
    pub color: String,
}

impl SeverityBand {
    fn below(upper: f64, color: &str) -> Self {
        Self {
            upper: Some(upper),
            color: color.to_string(),
        }
    }

    fn open(color: &str) -> Self {
        Self {
            upper: None,
            color: color.to_string(),
        }
    }
}

/// Ordered growth-rate bands, evaluated in ascending order with half-open upper bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityScale {
    bands: Vec<SeverityBand>,
}

impl Default for SeverityScale {
    fn default() -> Self {
        Self {
            bands: vec![
                SeverityBand::below(-2.0, "#102742"),
                SeverityBand::below(0.0, "#1c3e6d"),
                SeverityBand::below(1.0, "#cfe97d"),
                SeverityBand::below(2.0, "#a7d86a"),
                SeverityBand::below(3.0, "#71b85e"),
                SeverityBand::below(4.0, "#37a387"),
                SeverityBand::below(5.5, "#fad12f"),
                SeverityBand::below(7.0, "#f8a947"),
                SeverityBand::below(8.5, "#f49828"),
                SeverityBand::open("#d94300"),
            ],
        }
    }
}

impl SeverityScale {
    pub fn new(bands: Vec<SeverityBand>) -> Result<Self, ConfigError> {
        let scale = Self { bands };
        scale.validate()?;
        Ok(scale)
    }

    pub fn bands(&self) -> &[SeverityBand] {
        &self.bands
    }

    /// Bounded bands must be strictly ascending and finite; only the last band is unbounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some((last, bounded)) = self.bands.split_last() else {
            return Err(ConfigError::Invalid(
                "severity scale needs at least one band".to_string(),
            ));
        };
        if last.upper.is_some() {
            return Err(ConfigError::Invalid(
                "last severity band must not have an upper bound".to_string(),
            ));
        }

        let mut previous: Option<f64> = None;
        for band in bounded {
            let Some(upper) = band.upper else {
                return Err(ConfigError::Invalid(format!(
                    "severity band {} is unbounded but is not the last band",
                    band.color
                )));
            };
            if !upper.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "severity band {} has a non-finite bound",
                    band.color
                )));
            }
            if previous.is_some_and(|previous| upper <= previous) {
                return Err(ConfigError::Invalid(format!(
                    "severity band bounds must ascend (found {upper} after {})",
                    previous.unwrap_or_default()
                )));
            }
            previous = Some(upper);
        }
        Ok(())
    }

    /// Index of the first band whose upper bound exceeds `value`. NaN lands in the last band.
    pub fn band_index(&self, value: f64) -> usize {
        self.bands
            .iter()
            .position(|band| band.upper.is_some_and(|upper| value < upper))
            .unwrap_or(self.bands.len().saturating_sub(1))
    }
}

/// Maps a growth value onto its severity color. Total over every `f64`.
pub fn bucket_color(value: f64, scale: &SeverityScale) -> &str {
    scale
        .bands
        .get(scale.band_index(value))
        .map(|band| band.color.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_valid() {
        let scale = SeverityScale::default();
        assert_eq!(scale.bands().len(), 10);
        scale.validate().expect("default scale validates");
    }

    #[test]
    fn boundaries_belong_to_the_next_band() {
        let scale = SeverityScale::default();
        assert_eq!(bucket_color(1.0, &scale), "#a7d86a");
        assert_eq!(bucket_color(0.999, &scale), "#cfe97d");
        assert_eq!(bucket_color(-2.0, &scale), "#1c3e6d");
        assert_eq!(bucket_color(8.5, &scale), "#d94300");
    }

    #[test]
    fn extremes_and_nan_are_covered() {
        let scale = SeverityScale::default();
        assert_eq!(bucket_color(f64::NEG_INFINITY, &scale), "#102742");
        assert_eq!(bucket_color(-1e300, &scale), "#102742");
        assert_eq!(bucket_color(f64::INFINITY, &scale), "#d94300");
        assert_eq!(bucket_color(f64::NAN, &scale), "#d94300");
    }

    #[test]
    fn rejects_descending_bounds() {
        let bands = vec![
            SeverityBand::below(2.0, "a"),
            SeverityBand::below(1.0, "b"),
            SeverityBand::open("c"),
        ];
        assert!(SeverityScale::new(bands).is_err());
    }

    #[test]
    fn rejects_bounded_last_band() {
        let bands = vec![SeverityBand::below(2.0, "a")];
        assert!(SeverityScale::new(bands).is_err());
    }
}
