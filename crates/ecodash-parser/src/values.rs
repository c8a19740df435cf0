use crate::errors::ParserError;
use crate::schema::UNKNOWN_CONTINENT;

fn is_missing_token(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("null")
}

pub(crate) fn parse_name(
    value: &str,
    line_index: usize,
    column: &'static str,
) -> Result<String, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParserError::DataRow {
            line_index,
            column,
            message: "value must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_optional_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_continent(value: &str) -> String {
    parse_optional_name(value).unwrap_or_else(|| UNKNOWN_CONTINENT.to_string())
}

pub(crate) fn parse_year(
    value: &str,
    line_index: usize,
    column: &'static str,
) -> Result<i64, ParserError> {
    let trimmed = value.trim();
    if let Ok(year) = trimmed.parse::<i64>() {
        return Ok(year);
    }

    // pandas exports integer columns with missing cells as floats ("1850.0")
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => Ok(parsed as i64),
        _ => Err(ParserError::DataRow {
            line_index,
            column,
            message: format!("failed to parse '{trimmed}' as integer year"),
        }),
    }
}

pub(crate) fn parse_optional_f64(
    value: &str,
    line_index: usize,
    column: &'static str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            line_index,
            column,
            message: format!("failed to parse '{trimmed}' as float: {err}"),
        })
}
