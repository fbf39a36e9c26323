//! Data content, vertical domain and time descriptors

use chrono::NaiveDate;
use eyre::{Context, Result};
use serde_json::{Value, json};

/// Content names accepted in `data.content`
pub const ALLOWED_CONTENTS: &[&str] = &[
    "depth",
    "time",
    "thickness",
    "property",
    "seismic",
    "fluid_contact",
    "field_outline",
    "regions",
    "pinchout",
    "subcrop",
    "fault_lines",
    "velocity",
    "volumes",
    "volumetrics",
    "khproduct",
    "timeseries",
];

/// What the values of an object represent
///
/// Given either as a plain name (`"depth"`) or as a single-key map carrying
/// content specific details (`{"property": {"attribute": "porosity"}}`).
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub kind: String,
    pub details: Option<Value>,
}

impl Content {
    pub fn parse(value: &Value) -> Result<Self> {
        let content = match value {
            Value::String(kind) => Self {
                kind: kind.clone(),
                details: None,
            },
            Value::Object(map) if map.len() == 1 => {
                let (kind, details) = map
                    .iter()
                    .next()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .ok_or_else(|| eyre::eyre!("Content map is empty"))?;
                Self {
                    kind,
                    details: Some(details),
                }
            }
            other => eyre::bail!(
                "Content must be a name or a map with a single key, got: {}",
                other
            ),
        };

        if !ALLOWED_CONTENTS.contains(&content.kind.as_str()) {
            eyre::bail!(
                "Invalid content: {}. Valid contents are: {}",
                content.kind,
                ALLOWED_CONTENTS.join(", ")
            );
        }
        // Details land under `data.<kind>`, where `data.time` is taken by time data
        if content.kind == "time" && content.details.is_some() {
            eyre::bail!("Content time takes no details, give it as a plain name");
        }
        Ok(content)
    }
}

/// Vertical domain and its reference datum, e.g. depth below `msl`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalDomain {
    pub domain: String,
    pub reference: String,
}

impl VerticalDomain {
    pub fn new(domain: impl Into<String>, reference: impl Into<String>) -> Result<Self> {
        let domain = domain.into();
        if domain != "depth" && domain != "time" {
            eyre::bail!("Vertical domain must be depth or time, got: {}", domain);
        }
        Ok(Self {
            domain,
            reference: reference.into(),
        })
    }

    /// Parse the single-key map form `{"depth": "msl"}`
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.as_object() {
            Some(map) if map.len() == 1 => {
                let (domain, reference) = map
                    .iter()
                    .next()
                    .ok_or_else(|| eyre::eyre!("Vertical domain map is empty"))?;
                let reference = reference
                    .as_str()
                    .ok_or_else(|| eyre::eyre!("Vertical domain reference must be a string"))?;
                Self::new(domain.clone(), reference)
            }
            _ => eyre::bail!("Vertical domain must be a map with a single key, got: {}", value),
        }
    }
}

/// One `[date, label]` entry of time data, dates as `YYYYMMDD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub date: String,
    pub label: Option<String>,
}

impl TimeEntry {
    pub fn new(date: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            date: date.into(),
            label: label.map(|l| l.to_string()),
        }
    }

    /// Date as an ISO 8601 timestamp at midnight
    pub fn iso(&self) -> Result<String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y%m%d")
            .with_context(|| format!("Invalid date {}, expected YYYYMMDD", self.date))?;
        Ok(date.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    fn to_value(&self) -> Result<Value> {
        Ok(json!({"value": self.iso()?, "label": self.label}))
    }
}

/// Entries in chronological order; `YYYYMMDD` sorts as text
fn chronological(timedata: &[TimeEntry]) -> Vec<&TimeEntry> {
    let mut sorted: Vec<&TimeEntry> = timedata.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

/// Filename dates (`t1`, `t2`) from time data, `t1` being the earliest
pub fn filename_times(timedata: &[TimeEntry]) -> (Option<String>, Option<String>) {
    let sorted = chronological(timedata);
    (
        sorted.first().map(|t| t.date.clone()),
        sorted.get(1).map(|t| t.date.clone()),
    )
}

/// The `data.time` block: earliest entry as `t0`, the other as `t1`
pub fn time_block(timedata: &[TimeEntry]) -> Result<Option<Value>> {
    match chronological(timedata).as_slice() {
        [] => Ok(None),
        [t0] => Ok(Some(json!({"t0": t0.to_value()?}))),
        [t0, t1] => Ok(Some(json!({"t0": t0.to_value()?, "t1": t1.to_value()?}))),
        _ => eyre::bail!("At most two time entries are supported, got {}", timedata.len()),
    }
}
