use std::cmp::Ordering;

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::frame::float_values;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelationValue {
    Coefficient(f64),
    /// Fewer than two rows had both values present.
    InsufficientData { observations: usize },
    /// One of the two series is constant over the paired rows.
    ZeroVariance { observations: usize },
}

impl CorrelationValue {
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            CorrelationValue::Coefficient(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, CorrelationValue::Coefficient(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub column: String,
    pub value: CorrelationValue,
}

/// Pearson coefficient over paired observations. Deviations are scaled by their largest
/// magnitude before the products are formed.
pub fn pearson(pairs: &[(f64, f64)]) -> CorrelationValue {
    let observations = pairs.len();
    if observations < 2 {
        return CorrelationValue::InsufficientData { observations };
    }

    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    for (count, (x, y)) in pairs.iter().enumerate() {
        let k = (count + 1) as f64;
        mean_x += (x - mean_x) / k;
        mean_y += (y - mean_y) / k;
    }

    let scale_x = pairs.iter().fold(0.0f64, |acc, (x, _)| acc.max((x - mean_x).abs()));
    let scale_y = pairs.iter().fold(0.0f64, |acc, (_, y)| acc.max((y - mean_y).abs()));
    if scale_x == 0.0 || scale_y == 0.0 {
        return CorrelationValue::ZeroVariance { observations };
    }

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in pairs {
        let dx = (x - mean_x) / scale_x;
        let dy = (y - mean_y) / scale_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    // sqrt of the product keeps a series correlated with itself at exactly 1.0
    let r = sxy / (sxx * syy).sqrt();
    if r.is_finite() {
        CorrelationValue::Coefficient(r.clamp(-1.0, 1.0))
    } else {
        CorrelationValue::ZeroVariance { observations }
    }
}

/// Correlates every candidate column with `target_column` using pairwise-complete rows.
///
/// The result is sorted by coefficient, highest first; undefined coefficients follow in the
/// order the candidates were given.
pub fn correlation_with(
    data: &DataFrame,
    target_column: &str,
    candidate_columns: &[&str],
) -> Result<Vec<Correlation>> {
    let target = float_values(data, target_column, "correlation_with")?;

    let mut correlations = Vec::with_capacity(candidate_columns.len());
    for name in candidate_columns {
        let candidate = float_values(data, name, "correlation_with")?;
        let pairs: Vec<(f64, f64)> = target
            .iter()
            .zip(&candidate)
            .filter_map(|pair| match pair {
                (Some(t), Some(c)) if t.is_finite() && c.is_finite() => Some((*c, *t)),
                _ => None,
            })
            .collect();

        let value = pearson(&pairs);
        debug!(
            target = target_column,
            column = *name,
            observations = pairs.len(),
            ?value,
            "Computed correlation"
        );
        correlations.push(Correlation {
            column: name.to_string(),
            value,
        });
    }

    correlations.sort_by(|left, right| match (left.value, right.value) {
        (CorrelationValue::Coefficient(l), CorrelationValue::Coefficient(r)) => r.total_cmp(&l),
        (CorrelationValue::Coefficient(_), _) => Ordering::Less,
        (_, CorrelationValue::Coefficient(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    });

    Ok(correlations)
}

/// Plot-ready `(sector, correlation)` table; undefined coefficients become missing.
pub fn correlation_frame(correlations: &[Correlation]) -> Result<DataFrame> {
    let sectors: Vec<&str> = correlations.iter().map(|c| c.column.as_str()).collect();
    let values: Vec<Option<f64>> = correlations.iter().map(|c| c.value.coefficient()).collect();

    Ok(DataFrame::new(vec![
        Series::new("sector".into(), sectors).into(),
        Series::new("correlation".into(), values).into(),
    ])?)
}
