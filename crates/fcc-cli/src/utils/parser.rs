use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid point '{0}'. Expected three comma-separated numbers (e.g., '0,0,1.5').")]
    InvalidPoint(String),

    #[error("Invalid {kind} value for {key}: '{value}'")]
    InvalidValue {
        key: String,
        kind: &'static str,
        value: String,
    },
}

/// Splits a `KEY=VALUE` override into its two parts. Both sides are trimmed and the key must
/// not be empty; the value may contain further `=` characters.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

pub fn parse_point(s: &str) -> Result<[f64; 3], ParseError> {
    let invalid = || ParseError::InvalidPoint(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let mut point = [0.0; 3];
    for (slot, part) in point.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|_| invalid())?;
        if !slot.is_finite() {
            return Err(invalid());
        }
    }
    Ok(point)
}

pub fn parse_float(key: &str, value: &str) -> Result<f64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        kind: "float",
        value: value.to_string(),
    })
}
