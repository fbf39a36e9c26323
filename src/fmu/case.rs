//! Case metadata (`share/metadata/fmu_case.yml`)
//!
//! A case is initialized once, before any realization runs, and every
//! exported object points back to it through `fmu.case`.

use crate::config::{GlobalConfig, ModelInfo};
use crate::metadata::{SCHEMA, SOURCE, VERSION, TracklogEvent, User};
use crate::storage::uuid_from_string;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Location of the case metadata file within a case folder
pub const CASE_METADATA_PATH: &str = "share/metadata/fmu_case.yml";

/// The `fmu.case` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInfo {
    pub name: String,
    pub uuid: Uuid,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFmu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
    pub case: CaseInfo,
}

/// Contents of `fmu_case.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub source: String,
    pub class: String,
    pub fmu: CaseFmu,
    #[serde(default)]
    pub tracklog: Vec<TracklogEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masterdata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Value>,
}

impl CaseMetadata {
    /// New case metadata with a fresh random case uuid
    pub fn new(config: &GlobalConfig, casename: &str, description: Option<Vec<String>>) -> Self {
        Self {
            schema: SCHEMA.to_string(),
            version: VERSION.to_string(),
            source: SOURCE.to_string(),
            class: "case".to_string(),
            fmu: CaseFmu {
                model: config.model.clone(),
                case: CaseInfo {
                    name: casename.to_string(),
                    uuid: Uuid::new_v4(),
                    user: User::current(),
                    description,
                },
            },
            tracklog: vec![TracklogEvent::created()],
            masterdata: config.masterdata.clone(),
            access: config
                .access
                .as_ref()
                .and_then(|a| serde_json::to_value(a).ok()),
        }
    }

    /// Path of the metadata file for a case folder
    pub fn path_for(case_path: impl AsRef<Path>) -> PathBuf {
        case_path.as_ref().join(CASE_METADATA_PATH)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read case metadata: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse case metadata: {}", path.display()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create folder: {}", parent.display()))?;
        }

        let yaml = serde_yaml::to_string(self)
            .with_context(|| "Failed to serialize case metadata to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write case metadata: {}", path.display()))?;
        Ok(())
    }

    /// The `fmu.case` block for a case folder.
    ///
    /// Falls back to the folder name and a uuid derived from the folder path
    /// when the case was never initialized.
    pub fn case_info_for(case_path: &Path) -> Result<CaseInfo> {
        let path = Self::path_for(case_path);
        if path.exists() {
            return Ok(Self::read(&path)?.fmu.case);
        }

        log::warn!(
            "No case metadata at {}, deriving case identity from the folder",
            path.display()
        );
        let name = case_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(CaseInfo {
            name,
            uuid: uuid_from_string(&case_path.to_string_lossy()),
            user: User::current(),
            description: None,
        })
    }
}

/// Write case metadata for `<rootfolder>/<casename>`.
///
/// Refuses to replace an existing case file unless `overwrite` is set.
/// Returns the path written.
pub fn initialize_case(
    config: &GlobalConfig,
    rootfolder: impl AsRef<Path>,
    casename: &str,
    description: Option<Vec<String>>,
    overwrite: bool,
) -> Result<PathBuf> {
    let case_path = rootfolder.as_ref().join(casename);
    let path = CaseMetadata::path_for(&case_path);

    if path.exists() && !overwrite {
        eyre::bail!(
            "Case metadata already exists at {}, refusing to overwrite",
            path.display()
        );
    }

    let metadata = CaseMetadata::new(config, casename, description);
    metadata.write(&path)?;

    log::info!(
        "Initialized case {} ({}) at {}",
        casename,
        metadata.fmu.case.uuid,
        path.display()
    );
    Ok(path)
}
