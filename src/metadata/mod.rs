//! Metadata documents for exported objects
//!
//! A document is assembled as a JSON value with every optional field in
//! place, unset ones as `null`. Nulls are pruned when the sidecar is written.
//!
//! Top-level layout:
//! ```yaml
//! $schema: ...
//! version: 0.8.0
//! source: fmu
//! tracklog: [...]
//! class: surface
//! fmu: {model, case, iteration, realization, workflow}
//! file: {relative_path, absolute_path, checksum_md5, size_bytes}
//! data: {name, stratigraphic, content, unit, spec, bbox, time, ...}
//! display: {name}
//! access: {asset, ssdl}
//! masterdata: {smda: ...}
//! ```

mod content;
mod tracklog;

pub use content::{
    ALLOWED_CONTENTS, Content, TimeEntry, VerticalDomain, filename_times, time_block,
};
pub use tracklog::{TracklogEvent, User};

use crate::config::{GlobalConfig, Ssdl};
use crate::fmu::{CaseInfo, RunContext};
use crate::objects::GeoObject;
use crate::storage::{ExportPaths, md5sum, size, uuid_from_string};
use eyre::Result;
use serde::Serialize;
use serde_json::{Map, Value, json};

pub const SCHEMA: &str =
    "https://main-fmu-schemas-prod.radix.equinor.com/schemas/0.8.0/fmu_results.json";
pub const VERSION: &str = "0.8.0";
pub const SOURCE: &str = "fmu";

/// The `file` block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub relative_path: String,
    pub absolute_path: String,
    pub checksum_md5: Option<String>,
    pub size_bytes: Option<u64>,
}

impl FileInfo {
    /// Describe an export's data file; checksum and size need the file on disk
    pub fn from_paths(paths: &ExportPaths, written: bool) -> Result<Self> {
        let (checksum_md5, size_bytes) = match written {
            true => (Some(md5sum(&paths.path)?), Some(size(&paths.path)?)),
            false => (None, None),
        };
        Ok(Self {
            relative_path: paths.relpath.clone(),
            absolute_path: paths.abspath.to_string_lossy().to_string(),
            checksum_md5,
            size_bytes,
        })
    }
}

/// What an export says about its data, beyond the object itself
#[derive(Debug, Clone, Default)]
pub struct DataDescription {
    pub name: String,
    pub content: Option<Content>,
    pub tagname: Option<String>,
    pub unit: Option<String>,
    pub vertical_domain: Option<VerticalDomain>,
    pub timedata: Vec<TimeEntry>,
    pub is_prediction: bool,
    pub is_observation: bool,
    pub description: Option<Vec<String>>,
    pub format: String,
}

/// Build the `data` block.
///
/// When the name is known to the stratigraphy in `config`, the official
/// stratigraphic name and aliases are used.
pub fn data_block(
    object: &GeoObject,
    desc: &DataDescription,
    config: Option<&GlobalConfig>,
) -> Result<Value> {
    let strat = config.and_then(|c| c.stratigraphy_for(&desc.name));
    let (name, stratigraphic, alias, stratigraphic_alias) = match strat {
        Some(entry) => (
            entry.name.clone(),
            entry.stratigraphic,
            non_empty(&entry.alias),
            non_empty(&entry.stratigraphic_alias),
        ),
        None => (desc.name.clone(), false, None, None),
    };

    let content_kind = match &desc.content {
        Some(content) => content.kind.clone(),
        None => {
            log::warn!("No content given for {}, content is set to unset", desc.name);
            "unset".to_string()
        }
    };

    let bbox = object
        .bbox()
        .map(serde_json::to_value)
        .transpose()?;

    let mut data = Map::new();
    data.insert("name".to_string(), json!(name));
    data.insert("stratigraphic".to_string(), json!(stratigraphic));
    data.insert("alias".to_string(), json!(alias));
    data.insert("stratigraphic_alias".to_string(), json!(stratigraphic_alias));
    data.insert("content".to_string(), json!(content_kind));
    if let Some(Content {
        kind,
        details: Some(details),
    }) = &desc.content
    {
        data.insert(kind.clone(), details.clone());
    }
    data.insert("tagname".to_string(), json!(desc.tagname));
    data.insert("unit".to_string(), json!(desc.unit));
    data.insert(
        "vertical_domain".to_string(),
        json!(desc.vertical_domain.as_ref().map(|v| &v.domain)),
    );
    data.insert(
        "depth_reference".to_string(),
        json!(desc.vertical_domain.as_ref().map(|v| &v.reference)),
    );
    data.insert("layout".to_string(), json!(object.layout()));
    data.insert("spec".to_string(), object.spec());
    data.insert("bbox".to_string(), json!(bbox));
    data.insert("time".to_string(), json!(time_block(&desc.timedata)?));
    data.insert("format".to_string(), json!(desc.format));
    data.insert("is_prediction".to_string(), json!(desc.is_prediction));
    data.insert("is_observation".to_string(), json!(desc.is_observation));
    data.insert("description".to_string(), json!(desc.description));
    data.insert("undef".to_string(), json!(object.undef()));

    Ok(Value::Object(data))
}

fn non_empty(items: &[String]) -> Option<Vec<String>> {
    (!items.is_empty()).then(|| items.to_vec())
}

/// Build the `fmu` block for an export inside a case
pub fn fmu_block(
    ctx: &RunContext,
    case: &CaseInfo,
    config: Option<&GlobalConfig>,
    workflow: Option<&str>,
) -> Result<Value> {
    let iteration_uuid = uuid_from_string(&format!("{}{}", case.uuid, ctx.iteration_folder));
    let realization_uuid = uuid_from_string(&format!(
        "{}{}{}",
        case.uuid, ctx.iteration_folder, ctx.realization_id
    ));

    Ok(json!({
        "model": config.and_then(|c| c.model.as_ref()),
        "case": case,
        "iteration": {
            "id": ctx.iteration_id,
            "uuid": iteration_uuid,
            "name": ctx.iteration_folder,
        },
        "realization": {
            "id": ctx.realization_id,
            "uuid": realization_uuid,
            "name": ctx.realization_folder,
            "parameters": ctx.parameters()?,
        },
        "workflow": workflow.map(|w| json!({"reference": w})),
    }))
}

/// Build the `access` block; an explicit `ssdl` wins over the config's
pub fn access_block(config: Option<&GlobalConfig>, ssdl: Option<&Ssdl>) -> Option<Value> {
    let asset = config
        .and_then(|c| c.access.as_ref())
        .and_then(|a| a.asset.clone());
    let ssdl = ssdl
        .cloned()
        .or_else(|| config.and_then(|c| c.access.as_ref()).and_then(|a| a.ssdl.clone()));

    if asset.is_none() && ssdl.is_none() {
        return None;
    }
    Some(json!({"asset": asset, "ssdl": ssdl}))
}

/// The pieces of a complete metadata document
#[derive(Debug, Clone)]
pub struct MetadataParts {
    pub class: &'static str,
    pub fmu: Option<Value>,
    pub file: FileInfo,
    pub data: Value,
    pub display_name: Option<String>,
    pub access: Option<Value>,
    pub masterdata: Option<Value>,
}

/// Assemble the document in its canonical key order
pub fn assemble(parts: MetadataParts) -> Value {
    let display_name = parts
        .display_name
        .or_else(|| parts.data["name"].as_str().map(|s| s.to_string()));

    json!({
        "$schema": SCHEMA,
        "version": VERSION,
        "source": SOURCE,
        "tracklog": [TracklogEvent::created()],
        "class": parts.class,
        "fmu": parts.fmu,
        "file": parts.file,
        "data": parts.data,
        "display": {"name": display_name},
        "access": parts.access,
        "masterdata": parts.masterdata,
    })
}
