//! Export entry point
//!
//! [`ExportData`] carries everything an export needs to know besides the
//! object itself: run configuration, data description and output settings.
//! One instance can export many objects.
//!
//! ```no_run
//! use fmu_dataio::{ExportData, GlobalConfig};
//! use fmu_dataio::objects::{Polygons, Table};
//!
//! # fn example() -> eyre::Result<()> {
//! let config = GlobalConfig::read("../../fmuconfig/output/global_variables.yml")?;
//! let export = ExportData::new()
//!     .with_config(config)
//!     .with_content("fault_lines")
//!     .with_unit("m")
//!     .with_vertical_domain("depth", "msl")?
//!     .with_tagname("faultlines")
//!     .with_workflow("rms structural model");
//!
//! let polygons = Polygons::read_csv("../output/polygons/topvolantis.csv")?.with_name("TopVolantis");
//! let path = export.to_file(&polygons.into())?;
//! println!("Exported to {}", path.display());
//! # Ok(())
//! # }
//! ```

use crate::config::{GlobalConfig, Ssdl};
use crate::fmu::{CaseMetadata, RunContext};
use crate::formats::{FileFormats, FormatRegistry, FormatWriter, extension};
use crate::metadata::{
    Content, DataDescription, FileInfo, MetadataParts, TimeEntry, VerticalDomain, access_block,
    assemble, data_block, filename_times, fmu_block, time_block,
};
use crate::naming::{DEFAULT_EXPORT_ROOT, FilenameParts, construct_filename};
use crate::objects::GeoObject;
use crate::storage::{MetaFormat, PathContext, export_metadata_file, verify_path};
use crate::verbosity::Verbosity;
use eyre::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Output settings shared by every export of an [`ExportData`]
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Root folder of exported files, relative to the working folder
    pub export_root: PathBuf,
    /// Create missing destination folders
    pub createfolder: bool,
    pub meta_format: MetaFormat,
    /// File format per object class
    pub formats: FileFormats,
    /// Resolve paths and build metadata without writing anything
    pub dryrun: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            export_root: PathBuf::from(DEFAULT_EXPORT_ROOT),
            createfolder: true,
            meta_format: MetaFormat::Yaml,
            formats: FileFormats::default(),
            dryrun: false,
        }
    }
}

/// Exports geo-objects with standardized names and metadata sidecars
#[derive(Debug, Default)]
pub struct ExportData {
    config: Option<GlobalConfig>,
    name: Option<String>,
    content: Option<Value>,
    unit: Option<String>,
    vertical_domain: Option<VerticalDomain>,
    timedata: Vec<TimeEntry>,
    is_prediction: Option<bool>,
    is_observation: bool,
    tagname: Option<String>,
    parent: Option<String>,
    subfolder: Option<String>,
    description: Option<Vec<String>>,
    display_name: Option<String>,
    workflow: Option<String>,
    access_ssdl: Option<Ssdl>,
    runfolder: Option<PathBuf>,
    pwd: Option<PathBuf>,
    verbosity: Verbosity,
    settings: ExportSettings,
    writers: FormatRegistry,
}

impl ExportData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GlobalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `config` when given, which is convenient with [`GlobalConfig::from_env`]
    pub fn with_optional_config(mut self, config: Option<GlobalConfig>) -> Self {
        self.config = config;
        self
    }

    /// Name to export under, instead of the object's own name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Content as a name (`"depth"`) or a single-key map with details
    pub fn with_content(mut self, content: impl Into<Value>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_vertical_domain(
        mut self,
        domain: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self> {
        self.vertical_domain = Some(VerticalDomain::new(domain, reference)?);
        Ok(self)
    }

    /// Up to two `(YYYYMMDD, label)` entries
    pub fn with_timedata(mut self, timedata: Vec<TimeEntry>) -> Self {
        self.timedata = timedata;
        self
    }

    pub fn with_is_prediction(mut self, is_prediction: bool) -> Self {
        self.is_prediction = Some(is_prediction);
        self
    }

    pub fn with_is_observation(mut self, is_observation: bool) -> Self {
        self.is_observation = is_observation;
        self
    }

    pub fn with_tagname(mut self, tagname: impl Into<String>) -> Self {
        self.tagname = Some(tagname.into());
        self
    }

    /// Parent name used as the filename prefix, e.g. the grid of a property
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = Some(subfolder.into());
        self
    }

    pub fn with_description(mut self, description: Vec<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_workflow(mut self, workflow: impl Into<String>) -> Self {
        self.workflow = Some(workflow.into());
        self
    }

    pub fn with_access_ssdl(mut self, ssdl: Ssdl) -> Self {
        self.access_ssdl = Some(ssdl);
        self
    }

    /// Run as if started from `runfolder`, typically `<realization>/<iteration>/rms/model`
    pub fn with_runfolder(mut self, runfolder: impl AsRef<Path>) -> Self {
        self.runfolder = Some(runfolder.as_ref().to_path_buf());
        self
    }

    /// Working folder that the export root is resolved against
    pub fn with_pwd(mut self, pwd: impl AsRef<Path>) -> Self {
        self.pwd = Some(pwd.as_ref().to_path_buf());
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_export_root(mut self, export_root: impl AsRef<Path>) -> Self {
        self.settings.export_root = export_root.as_ref().to_path_buf();
        self
    }

    pub fn with_meta_format(mut self, meta_format: MetaFormat) -> Self {
        self.settings.meta_format = meta_format;
        self
    }

    /// Register a writer, e.g. for a binary format
    pub fn with_writer(mut self, writer: impl FormatWriter + 'static) -> Self {
        self.writers.register(writer);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ExportSettings {
        &mut self.settings
    }

    /// Export an object and its metadata; returns the data file's absolute path
    pub fn to_file(&self, object: &GeoObject) -> Result<PathBuf> {
        self.to_file_with_verbosity(object, self.verbosity)
    }

    /// Like [`to_file`](Self::to_file) with a verbosity for this call only
    pub fn to_file_with_verbosity(
        &self,
        object: &GeoObject,
        verbosity: Verbosity,
    ) -> Result<PathBuf> {
        verbosity.apply();

        let class = object.class();
        let format = self.settings.formats.for_class(class);
        let ext = extension(class, format)?;
        let writer = match self.settings.dryrun {
            true => None,
            false => Some(self.writers.find(class, format)?),
        };

        let content = self.content.as_ref().map(Content::parse).transpose()?;
        time_block(&self.timedata)?;
        let name = self.resolve_name(object);
        log::info!("Exporting {} {} as {}", class, name, format);

        let (t1, t2) = filename_times(&self.timedata);
        let parts = FilenameParts {
            name: name.clone(),
            pretagname: self.parent.clone().or_else(|| object.parent().map(str::to_string)),
            tagname: self.tagname.clone(),
            t1,
            t2,
            subfolder: self.subfolder.clone(),
            ..Default::default()
        };
        let (stem, dest) = construct_filename(&parts, &self.settings.export_root, class.location());

        let pwd = self.working_folder()?;
        let run = RunContext::detect(&pwd)?;

        let desc = DataDescription {
            name: name.clone(),
            content,
            tagname: self.tagname.clone(),
            unit: self.unit.clone(),
            vertical_domain: self.vertical_domain.clone(),
            timedata: self.timedata.clone(),
            is_prediction: self.is_prediction.unwrap_or(true),
            is_observation: self.is_observation,
            description: self.description.clone(),
            format: format.to_string(),
        };

        if self.config.is_none() {
            log::warn!("No global config given, metadata will be incomplete");
        }
        let config = self.config.as_ref();

        // Everything that can fail on inputs is settled before the first write
        let data = data_block(object, &desc, config)?;
        let fmu = match &run {
            Some(ctx) => {
                let case = CaseMetadata::case_info_for(&ctx.case_path)?;
                Some(fmu_block(ctx, &case, config, self.workflow.as_deref())?)
            }
            None => {
                log::info!("Not running inside an FMU case, fmu block is omitted");
                None
            }
        };

        let path_ctx = PathContext {
            pwd: pwd.clone(),
            createfolder: self.settings.createfolder,
            realization_folder: run.as_ref().map(|r| r.realization_folder.clone()),
            iteration_folder: run.as_ref().map(|r| r.iteration_folder.clone()),
        };
        let paths = verify_path(&path_ctx, &dest, &stem, ext, self.settings.dryrun)?;

        if let Some(writer) = writer {
            writer
                .write(object, &paths.path)
                .with_context(|| format!("Failed to export {} to {}", name, paths.path.display()))?;
        }

        let metadata = assemble(MetadataParts {
            class: class.as_str(),
            fmu,
            file: FileInfo::from_paths(&paths, !self.settings.dryrun)?,
            data,
            display_name: self.display_name.clone(),
            access: access_block(config, self.access_ssdl.as_ref()),
            masterdata: config.and_then(|c| c.masterdata.clone()),
        });

        if !self.settings.dryrun {
            export_metadata_file(&paths.metapath, &metadata, self.settings.meta_format)?;
        }

        Ok(paths.abspath)
    }

    fn resolve_name(&self, object: &GeoObject) -> String {
        self.name
            .clone()
            .or_else(|| object.name().map(str::to_string))
            .unwrap_or_else(|| {
                log::warn!("Neither the export nor the object has a name, using unknown");
                "unknown".to_string()
            })
    }

    fn working_folder(&self) -> Result<PathBuf> {
        match self.runfolder.as_ref().or(self.pwd.as_ref()) {
            Some(folder) => Ok(folder.clone()),
            None => std::env::current_dir().with_context(|| "Failed to read current directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Column, Cube, GridProperty, RegularSurface, Table};
    use tempfile::TempDir;

    struct GeometryOnlyWriter;

    impl FormatWriter for GeometryOnlyWriter {
        fn format(&self) -> &str {
            "segy"
        }

        fn supports(&self, class: crate::objects::DataClass) -> bool {
            class == crate::objects::DataClass::Cube
        }

        fn write(&self, object: &GeoObject, path: &Path) -> Result<()> {
            std::fs::write(path, object.spec().to_string())?;
            Ok(())
        }
    }

    fn read_yaml(path: &Path) -> Value {
        serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    #[serial_test::serial]
    fn test_table_export_outside_case() {
        let temp = TempDir::new().unwrap();
        let table = Table::new(vec![Column::numeric("STOIIP", vec![1.0, 2.0])])
            .unwrap()
            .with_name("Volumes");

        let exp = ExportData::new()
            .with_content("volumes")
            .with_export_root("share/results")
            .with_pwd(temp.path());
        let path = exp.to_file(&table.into()).unwrap();

        let expected = temp.path().join("share/results/tables/volumes.csv");
        assert_eq!(path, expected);
        assert!(expected.is_file());

        let meta = read_yaml(&temp.path().join("share/results/tables/.volumes.csv.yml"));
        assert_eq!(meta["class"], "table");
        assert_eq!(meta["file"]["relative_path"], "share/results/tables/volumes.csv");
        assert_eq!(meta["file"]["checksum_md5"].as_str().unwrap().len(), 32);
        assert_eq!(meta["data"]["spec"]["columns"][0], "STOIIP");
        assert!(meta.get("fmu").is_none());
        assert!(meta.get("masterdata").is_none());
        assert!(meta["data"].get("unit").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_external_writer_and_json_metadata() {
        let temp = TempDir::new().unwrap();

        let exp = ExportData::new()
            .with_name("testcube")
            .with_content("seismic")
            .with_export_root(temp.path())
            .with_meta_format(MetaFormat::Json)
            .with_writer(GeometryOnlyWriter);
        exp.to_file(&Cube::new(5, 8, 3).into()).unwrap();

        let meta_path = temp.path().join("cubes/.testcube.segy.json");
        let meta: Value = serde_json::from_str(&std::fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(meta["class"], "cube");
        assert_eq!(meta["data"]["bbox"]["xmax"], 100.0);
        assert_eq!(meta["data"]["format"], "segy");
    }

    #[test]
    #[serial_test::serial]
    fn test_missing_writer_is_an_error() {
        let temp = TempDir::new().unwrap();
        let exp = ExportData::new().with_name("x").with_export_root(temp.path());

        let err = exp.to_file(&Cube::new(2, 2, 2).into()).unwrap_err();
        assert!(err.to_string().contains("No writer registered for cube in format segy"));
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_content_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut exp = ExportData::new()
            .with_name("top")
            .with_content("banana")
            .with_export_root(temp.path());
        exp.settings_mut().formats.surface = "irap_ascii".to_string();

        let err = exp
            .to_file(&RegularSurface::new(2, 2, 1.0, 1.0, 0.0).into())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid content"));
    }

    #[test]
    #[serial_test::serial]
    fn test_dryrun_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut exp = ExportData::new()
            .with_name("top")
            .with_export_root("share/results")
            .with_pwd(temp.path());
        exp.settings_mut().dryrun = true;

        let path = exp.to_file(&Cube::new(2, 2, 2).into()).unwrap();
        assert_eq!(path, temp.path().join("share/results/cubes/top.segy"));
        assert!(!temp.path().join("share").exists());
    }

    #[test]
    #[serial_test::serial]
    fn test_grid_property_uses_parent_prefix() {
        let temp = TempDir::new().unwrap();
        let prop = GridProperty::new(2, 2, 2, 0.2)
            .with_name("PHIT")
            .with_parent("Geogrid.Valysar");

        let mut exp = ExportData::new()
            .with_export_root(temp.path())
            .with_content(serde_json::json!({"property": {"attribute": "porosity"}}));
        exp.settings_mut().dryrun = true;

        let path = exp.to_file(&prop.into()).unwrap();
        assert_eq!(path, temp.path().join("grids/geogrid_valysar--phit.roff"));
    }

    #[test]
    fn test_working_folder_prefers_runfolder() {
        let exp = ExportData::new().with_pwd("/a").with_runfolder("/b");
        assert_eq!(exp.working_folder().unwrap(), PathBuf::from("/b"));
    }
}
