//! Reader for the legacy `parameters.txt` format
//!
//! The file holds one `KEY VALUE` pair per line, where `KEY` may carry a
//! single `GROUP:` prefix:
//!
//! ```text
//! SENSNAME rms_seed
//! RMS_SEED 1000
//! GLOBVAR:VOLON_PERMH_CHANNEL 1100
//! LOG10_MULTREGT:MULT_THERYS_VOLON -3.21365
//! ```
//!
//! Older tooling writes the same content right-justified with leading
//! whitespace and tab separated columns; both layouts parse identically.
//! Grouped keys end up in a nested map:
//!
//! ```yaml
//! SENSNAME: rms_seed
//! RMS_SEED: 1000
//! GLOBVAR:
//!   VOLON_PERMH_CHANNEL: 1100
//! LOG10_MULTREGT:
//!   MULT_THERYS_VOLON: -3.21365
//! ```

use eyre::{Context, Result};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Read a `parameters.txt` file into an ordered map.
pub fn read_parameters_txt(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    log::debug!("Reading parameters.txt from {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters file: {}", path.display()))?;

    parse_parameters(&content)
        .with_context(|| format!("Failed to parse parameters file: {}", path.display()))
}

/// Parse the text content of a `parameters.txt` file.
pub fn parse_parameters(content: &str) -> Result<Map<String, Value>> {
    log::debug!("Buffer has {} lines", content.lines().count());

    let mut params = Map::new();

    for raw in content.lines() {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let line = tokens.join(":");
        let items: Vec<&str> = line.split(':').collect();

        match items.as_slice() {
            [key, value] => {
                params.insert(key.to_string(), check_if_number(value));
            }
            [group, key, value] => {
                let entry = params
                    .entry(group.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                let Some(group_map) = entry.as_object_mut() else {
                    eyre::bail!(
                        "Parameter group {} conflicts with a plain parameter of the same name",
                        group
                    );
                };
                group_map.insert(key.to_string(), check_if_number(value));
            }
            _ => eyre::bail!("Unexpected structure of parameters.txt, line is: {}", line),
        }
    }

    Ok(params)
}

/// Convert a string to an integer or float when it looks like one.
///
/// # Example
/// ```
/// use fmu_dataio::storage::check_if_number;
/// use serde_json::json;
///
/// assert_eq!(check_if_number("1000"), json!(1000));
/// assert_eq!(check_if_number("0.6"), json!(0.6));
/// assert_eq!(check_if_number("p10_p90"), json!("p10_p90"));
/// ```
pub fn check_if_number(value: &str) -> Value {
    if let Ok(int) = value.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = value.parse::<f64>()
        && let Some(number) = Number::from_f64(float)
    {
        return Value::Number(number);
    }
    Value::String(value.to_string())
}
