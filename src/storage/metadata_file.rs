//! Metadata sidecar writer

use crate::transform::{NullDropper, Transformer};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Serialization format of the metadata sidecar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for MetaFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => eyre::bail!("Unsupported metadata format: {}", other),
        }
    }
}

impl fmt::Display for MetaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Write metadata to its sidecar file.
///
/// Null fields are pruned first. YAML goes to `path` as given; JSON goes to
/// `path` with its `.yml` extension replaced by `.json`. Returns the path written.
pub fn export_metadata_file(
    path: impl AsRef<Path>,
    metadata: &Value,
    format: MetaFormat,
) -> Result<PathBuf> {
    let is_empty = match metadata {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        eyre::bail!("Export of metadata was requested, but no metadata are present.");
    }

    let pruned = NullDropper.transform(metadata.clone())?;

    let (target, content) = match format {
        MetaFormat::Yaml => {
            let yaml = serde_yaml::to_string(&pruned)
                .with_context(|| "Failed to serialize metadata to YAML")?;
            (path.as_ref().to_path_buf(), yaml)
        }
        MetaFormat::Json => {
            let json = serde_json::to_string_pretty(&pruned)
                .with_context(|| "Failed to serialize metadata to JSON")?;
            (path.as_ref().with_extension("json"), json)
        }
    };

    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write metadata file: {}", target.display()))?;

    log::info!("Metadata file on: {}", target.display());
    Ok(target)
}
