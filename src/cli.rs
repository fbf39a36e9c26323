//! CLI helper functions

use crate::{
    config::GlobalConfig,
    export::ExportData,
    fmu::initialize_case,
    metadata::TimeEntry,
    naming::{DEFAULT_EXPORT_ROOT, FilenameParts, ObjectLocation, construct_filename},
    objects::{GeoObject, Polygons, Table},
    storage::{MetaFormat, md5sum, read_parameters_txt, size},
    verbosity::Verbosity,
};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Load the global config from `path`, or from `$FMU_GLOBAL_CONFIG` when no path is given
pub fn load_global_config(path: Option<&Path>) -> Result<Option<GlobalConfig>> {
    match path {
        Some(path) => GlobalConfig::read(path).map(Some),
        None => GlobalConfig::from_env(),
    }
}

/// Kinds of objects the CLI can read from CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CsvKind {
    Table,
    Polygons,
}

/// Arguments of a CSV export
#[derive(Debug, Clone, Default)]
pub struct CsvExport {
    pub input: PathBuf,
    pub name: Option<String>,
    pub content: Option<String>,
    pub tagname: Option<String>,
    pub unit: Option<String>,
    /// `YYYYMMDD` dates, at most two
    pub dates: Vec<String>,
    pub export_root: Option<PathBuf>,
    pub runfolder: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub meta_format: MetaFormat,
    /// Log level applied for the duration of the export
    pub verbosity: Verbosity,
}

/// Export a CSV file as a table or polygons with metadata
///
/// The object is written in the default format of its class, which is CSV
/// for both, so the export is effectively a copy under a standard name.
pub fn export_csv(kind: CsvKind, args: &CsvExport) -> Result<PathBuf> {
    log::info!("Reading {:?} from {}", kind, args.input.display());
    let object: GeoObject = match kind {
        CsvKind::Table => Table::read_csv(&args.input)?.into(),
        CsvKind::Polygons => Polygons::read_csv(&args.input)?.into(),
    };

    let mut export = ExportData::new()
        .with_optional_config(load_global_config(args.config.as_deref())?)
        .with_timedata(args.dates.iter().map(|d| TimeEntry::new(d, None)).collect())
        .with_meta_format(args.meta_format)
        .with_verbosity(args.verbosity);

    if let Some(name) = &args.name {
        export = export.with_name(name);
    }
    if let Some(content) = &args.content {
        export = export.with_content(content.as_str());
    }
    if let Some(tagname) = &args.tagname {
        export = export.with_tagname(tagname);
    }
    if let Some(unit) = &args.unit {
        export = export.with_unit(unit);
    }
    if let Some(root) = &args.export_root {
        export = export.with_export_root(root);
    }
    if let Some(runfolder) = &args.runfolder {
        export = export.with_runfolder(runfolder);
    }

    export.to_file(&object)
}

/// Create case metadata from a global config
pub fn init_case(
    config_path: Option<&Path>,
    rootfolder: impl AsRef<Path>,
    casename: &str,
    description: Option<String>,
    overwrite: bool,
) -> Result<PathBuf> {
    let config = load_global_config(config_path)?.ok_or_else(|| {
        eyre::eyre!("A global config is required, pass --config or set $FMU_GLOBAL_CONFIG")
    })?;
    initialize_case(
        &config,
        rootfolder,
        casename,
        description.map(|d| vec![d]),
        overwrite,
    )
}

/// Preview the destination of an export without writing anything
pub fn preview_filename(
    location: ObjectLocation,
    parts: &FilenameParts,
    export_root: Option<&Path>,
) -> PathBuf {
    let root = export_root.unwrap_or_else(|| Path::new(DEFAULT_EXPORT_ROOT));
    let (stem, dest) = construct_filename(parts, root, location);
    dest.join(stem)
}

/// Parse a `parameters.txt` into pretty printed JSON
pub fn parameters_as_json(path: impl AsRef<Path>) -> Result<String> {
    let parameters = read_parameters_txt(path)?;
    serde_json::to_string_pretty(&parameters).with_context(|| "Failed to serialize parameters")
}

/// MD5 checksum and size in bytes of a file
pub fn checksum(path: impl AsRef<Path>) -> Result<(String, u64)> {
    let path = path.as_ref();
    Ok((md5sum(path)?, size(path)?))
}
