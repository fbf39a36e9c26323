//! Global configuration (`global_variables.yml`)
//!
//! Only the sections the exporter reads are typed. Everything else in the
//! file is kept as-is and reachable through [`GlobalConfig::lookup`].
//!
//! Example format:
//! ```yaml
//! model:
//!   name: ff
//!   revision: 21.0.0
//! masterdata:
//!   smda:
//!     country:
//!       - identifier: Norway
//!         uuid: ad214d85-8a1d-19da-e053-c918a4889309
//! access:
//!   asset:
//!     name: Drogon
//!   ssdl:
//!     access_level: internal
//!     rep_include: true
//! stratigraphy:
//!   TopVolantis:
//!     stratigraphic: true
//!     name: VOLANTIS GP. Top
//!     alias: [TopVOLANTIS, TOP_VOLANTIS]
//! ```

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable pointing at the global config file
pub const GLOBAL_CONFIG_ENV: &str = "FMU_GLOBAL_CONFIG";

/// Model name and revision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub revision: Option<String>,
}

/// Security classification of exported data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ssdl {
    #[serde(default = "default_access_level")]
    pub access_level: String,
    #[serde(default)]
    pub rep_include: bool,
}

fn default_access_level() -> String {
    "internal".to_string()
}

impl Default for Ssdl {
    fn default() -> Self {
        Self {
            access_level: default_access_level(),
            rep_include: false,
        }
    }
}

/// The `access` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AccessConfig {
    #[serde(default)]
    pub asset: Option<Value>,
    #[serde(default)]
    pub ssdl: Option<Ssdl>,
}

/// One entry of the `stratigraphy` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StratigraphyEntry {
    #[serde(default)]
    pub stratigraphic: bool,
    pub name: String,
    #[serde(default)]
    pub alias: Vec<String>,
    #[serde(default)]
    pub stratigraphic_alias: Vec<String>,
}

/// Parsed global configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GlobalConfig {
    #[serde(default)]
    pub model: Option<ModelInfo>,
    #[serde(default)]
    pub masterdata: Option<Value>,
    #[serde(default)]
    pub access: Option<AccessConfig>,
    #[serde(default)]
    pub stratigraphy: HashMap<String, StratigraphyEntry>,
    /// All remaining top-level sections
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl GlobalConfig {
    /// Read the config from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read global config: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse global config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).with_context(|| "Invalid global config YAML")?;
        Ok(config)
    }

    /// Read the config named by `FMU_GLOBAL_CONFIG`, if that variable is set
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(GLOBAL_CONFIG_ENV) {
            Ok(path) => {
                log::debug!("Reading global config from ${} = {}", GLOBAL_CONFIG_ENV, path);
                Self::read(&path).map(Some)
            }
            Err(_) => Ok(None),
        }
    }

    /// Stratigraphy entry for an object name
    pub fn stratigraphy_for(&self, name: &str) -> Option<&StratigraphyEntry> {
        self.stratigraphy.get(name)
    }

    /// Security classification, falling back to `internal` without reporting
    pub fn ssdl(&self) -> Ssdl {
        self.access
            .as_ref()
            .and_then(|a| a.ssdl.clone())
            .unwrap_or_default()
    }

    /// Look up a value by dotted path, e.g. `rms.horizons.TOP_RES`.
    ///
    /// Typed sections are reachable too, in their serialized form.
    pub fn lookup(&self, dotted: &str) -> Option<Value> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;

        let root = match first {
            "model" => serde_json::to_value(self.model.as_ref()?).ok()?,
            "masterdata" => self.masterdata.clone()?,
            "access" => serde_json::to_value(self.access.as_ref()?).ok()?,
            "stratigraphy" => serde_json::to_value(&self.stratigraphy).ok()?,
            other => self.other.get(other)?.clone(),
        };

        parts.try_fold(root, |value, key| match value {
            Value::Object(mut map) => map.remove(key),
            Value::Array(mut items) => {
                let idx: usize = key.parse().ok()?;
                (idx < items.len()).then(|| items.swap_remove(idx))
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIG: &str = r#"
model:
  name: ff
  revision: 21.0.0.dev
masterdata:
  smda:
    country:
      - identifier: Norway
        uuid: ad214d85-8a1d-19da-e053-c918a4889309
access:
  asset:
    name: Drogon
  ssdl:
    access_level: restricted
    rep_include: true
stratigraphy:
  TopVolantis:
    stratigraphic: true
    name: VOLANTIS GP. Top
    alias:
      - TopVOLANTIS
rms:
  horizons:
    TOP_RES: [TopVolantis, TopTherys, TopVolon, BaseVolantis]
"#;

    #[test]
    fn test_parse_sections() {
        let config = GlobalConfig::from_yaml(CONFIG).unwrap();

        assert_eq!(config.model.as_ref().unwrap().name, "ff");
        assert_eq!(config.ssdl().access_level, "restricted");
        assert!(config.ssdl().rep_include);

        let strat = config.stratigraphy_for("TopVolantis").unwrap();
        assert!(strat.stratigraphic);
        assert_eq!(strat.name, "VOLANTIS GP. Top");
        assert!(strat.stratigraphic_alias.is_empty());
        assert!(config.stratigraphy_for("Volantis").is_none());
    }

    #[test]
    fn test_lookup() {
        let config = GlobalConfig::from_yaml(CONFIG).unwrap();

        assert_eq!(
            config.lookup("rms.horizons.TOP_RES"),
            Some(json!(["TopVolantis", "TopTherys", "TopVolon", "BaseVolantis"]))
        );
        assert_eq!(config.lookup("rms.horizons.TOP_RES.1"), Some(json!("TopTherys")));
        assert_eq!(config.lookup("model.name"), Some(json!("ff")));
        assert_eq!(
            config.lookup("masterdata.smda.country.0.identifier"),
            Some(json!("Norway"))
        );
        assert_eq!(config.lookup("rms.wells"), None);
        assert_eq!(config.lookup("nothing"), None);
    }

    #[test]
    fn test_empty_config() {
        let config = GlobalConfig::from_yaml("{}").unwrap();
        assert!(config.model.is_none());
        assert_eq!(config.ssdl(), Ssdl::default());
    }

    #[test]
    fn test_read_missing_file() {
        let err = GlobalConfig::read("/nonexistent/global_variables.yml").unwrap_err();
        assert!(err.to_string().contains("Failed to read global config"));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("global_variables.yml");
        std::fs::write(&path, CONFIG).unwrap();

        unsafe {
            std::env::set_var(GLOBAL_CONFIG_ENV, &path);
        }
        let config = GlobalConfig::from_env().unwrap().unwrap();
        assert_eq!(config.model.unwrap().name, "ff");

        unsafe {
            std::env::remove_var(GLOBAL_CONFIG_ENV);
        }
        assert!(GlobalConfig::from_env().unwrap().is_none());
    }
}
