//! Null field pruning
//!
//! Metadata is assembled with every optional field present, unset ones as
//! `null`. Before writing, those nulls are dropped so the sidecar only carries
//! what is actually known.

use super::Transformer;
use eyre::Result;
use serde_json::{Map, Value};

/// Recursively drop null-valued keys from maps and return the pruned value.
///
/// Maps nested inside arrays are pruned as well, but a `null` that is itself an
/// array element is kept.
///
/// # Example
/// ```
/// use fmu_dataio::transform::drop_nones;
/// use serde_json::json;
///
/// let pruned = drop_nones(json!({"a": 1, "b": null, "c": {"d": null}}));
/// assert_eq!(pruned, json!({"a": 1, "c": {}}));
/// ```
pub fn drop_nones(input: Value) -> Value {
    match input {
        Value::Object(map) => Value::Object(drop_map_nones(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(drop_map_nones(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn drop_map_nones(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key, drop_nones(value)))
        .collect()
}

/// Transformer that prunes null fields from metadata documents
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDropper;

impl NullDropper {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for NullDropper {
    type Input = Value;
    type Output = Value;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(drop_nones(input))
    }
}
