//! Filename stems and destination folders
//!
//! FMU style 1 names a file after the object, optionally decorated with a
//! tag and one or two dates:
//!
//! ```text
//! surface:       name--tagname, name--tagname--t1, name--tagname--t2_t1
//!                topvolantis--ds_gf_extracted
//! gridproperty:  gridname--proptagname
//!                geogrid_valysar--phit
//! ```
//!
//! Dots and spaces never survive into a stem: downstream readers treat the
//! last dot as the start of the suffix.

use eyre::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default export root, relative to a realization's `rms/model` folder
pub const DEFAULT_EXPORT_ROOT: &str = "../../share/results/";

/// Naming convention for exported files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingStyle {
    #[default]
    Fmu1,
}

impl TryFrom<u8> for NamingStyle {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Fmu1),
            other => eyre::bail!("Unsupported FMU naming style: {}", other),
        }
    }
}

/// Destination category of an exported object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectLocation {
    Surface,
    Grid,
    Table,
    Polygons,
    Cube,
    Other,
}

impl ObjectLocation {
    /// Folder under the export root
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Surface => "maps",
            Self::Grid => "grids",
            Self::Table => "tables",
            Self::Polygons => "polygons",
            Self::Cube => "cubes",
            Self::Other => "other",
        }
    }
}

/// Unknown locations are not an error, they land in `other`.
impl FromStr for ObjectLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "surface" => Self::Surface,
            "grid" => Self::Grid,
            "table" => Self::Table,
            "polygons" => Self::Polygons,
            "cube" => Self::Cube,
            _ => Self::Other,
        })
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Surface => "surface",
            Self::Grid => "grid",
            Self::Table => "table",
            Self::Polygons => "polygons",
            Self::Cube => "cube",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// The pieces a filename stem is assembled from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameParts {
    pub name: String,
    pub pretagname: Option<String>,
    pub tagname: Option<String>,
    pub t1: Option<String>,
    pub t2: Option<String>,
    pub subfolder: Option<String>,
    pub style: NamingStyle,
}

impl FilenameParts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tagname(mut self, tagname: impl Into<String>) -> Self {
        self.tagname = Some(tagname.into());
        self
    }

    pub fn with_pretagname(mut self, pretagname: impl Into<String>) -> Self {
        self.pretagname = Some(pretagname.into());
        self
    }

    pub fn with_times(mut self, t1: Option<String>, t2: Option<String>) -> Self {
        self.t1 = t1;
        self.t2 = t2;
        self
    }

    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = Some(subfolder.into());
        self
    }
}

/// Build the filename stem and destination folder for an export.
///
/// # Example
/// ```
/// use fmu_dataio::naming::{FilenameParts, ObjectLocation, construct_filename};
/// use std::path::Path;
///
/// let parts = FilenameParts::new("TopVolantis")
///     .with_tagname("DS gf.extracted")
///     .with_times(Some("20180101".into()), Some("20200101".into()));
/// let (stem, dest) = construct_filename(&parts, Path::new("share/results"), ObjectLocation::Surface);
///
/// assert_eq!(stem, "topvolantis--ds_gf_extracted--20200101_20180101");
/// assert_eq!(dest, Path::new("share/results/maps"));
/// ```
pub fn construct_filename(
    parts: &FilenameParts,
    outroot: &Path,
    location: ObjectLocation,
) -> (String, PathBuf) {
    match parts.style {
        NamingStyle::Fmu1 => fmu1_filename(parts, outroot, location),
    }
}

fn fmu1_filename(
    parts: &FilenameParts,
    outroot: &Path,
    location: ObjectLocation,
) -> (String, PathBuf) {
    let mut stem = parts.name.to_lowercase();

    if let Some(tagname) = non_empty(&parts.tagname) {
        stem.push_str("--");
        stem.push_str(&tagname.to_lowercase());
    }

    if let Some(pretagname) = non_empty(&parts.pretagname) {
        stem = format!("{}--{}", pretagname.to_lowercase(), stem);
    }

    match (non_empty(&parts.t1), non_empty(&parts.t2)) {
        (Some(t1), None) => {
            stem.push_str("--");
            stem.push_str(&t1.to_lowercase());
        }
        (Some(t1), Some(t2)) => {
            stem.push_str(&format!("--{}_{}", t2.to_lowercase(), t1.to_lowercase()));
        }
        _ => {}
    }

    let stem = stem.replace(['.', ' '], "_");

    let mut dest = outroot.join(location.folder());
    if let Some(subfolder) = non_empty(&parts.subfolder) {
        dest = dest.join(subfolder);
    }

    log::debug!("Constructed stem {} in {}", stem, dest.display());
    (stem, dest)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from(DEFAULT_EXPORT_ROOT)
    }

    #[test]
    fn test_name_only() {
        let (stem, dest) = construct_filename(
            &FilenameParts::new("Volantis"),
            &root(),
            ObjectLocation::Cube,
        );
        assert_eq!(stem, "volantis");
        assert_eq!(dest, Path::new("../../share/results/cubes"));
    }

    #[test]
    fn test_tagname_is_sanitized() {
        let parts = FilenameParts::new("Volantis").with_tagname("what Descr");
        let (stem, _) = construct_filename(&parts, &root(), ObjectLocation::Cube);
        assert_eq!(stem, "volantis--what_descr");
    }

    #[test]
    fn test_pretagname_goes_first() {
        let parts = FilenameParts::new("PHIT").with_pretagname("Geogrid.Valysar");
        let (stem, dest) = construct_filename(&parts, &root(), ObjectLocation::Grid);
        assert_eq!(stem, "geogrid_valysar--phit");
        assert_eq!(dest, Path::new("../../share/results/grids"));

        let parts = parts.with_tagname("tag");
        let (stem, _) = construct_filename(&parts, &root(), ObjectLocation::Grid);
        assert_eq!(stem, "geogrid_valysar--phit--tag");
    }

    #[test]
    fn test_single_date() {
        let parts = FilenameParts::new("therys")
            .with_tagname("facies")
            .with_times(Some("20200101".into()), None);
        let (stem, _) = construct_filename(&parts, &root(), ObjectLocation::Surface);
        assert_eq!(stem, "therys--facies--20200101");
    }

    #[test]
    fn test_only_t2_is_ignored() {
        let parts = FilenameParts::new("therys").with_times(None, Some("20200101".into()));
        let (stem, _) = construct_filename(&parts, &root(), ObjectLocation::Surface);
        assert_eq!(stem, "therys");
    }

    #[test]
    fn test_subfolder_and_locations() {
        let parts = FilenameParts::new("faults").with_subfolder("structural");
        let (_, dest) = construct_filename(&parts, Path::new("out"), ObjectLocation::Polygons);
        assert_eq!(dest, Path::new("out/polygons/structural"));

        let (_, dest) = construct_filename(&parts, Path::new("out"), ObjectLocation::Table);
        assert_eq!(dest, Path::new("out/tables/structural"));
    }

    #[test]
    fn test_unknown_location_is_other() {
        let location: ObjectLocation = "wells".parse().unwrap();
        assert_eq!(location, ObjectLocation::Other);
        assert_eq!(location.folder(), "other");
        assert_eq!("surface".parse::<ObjectLocation>().unwrap().folder(), "maps");
    }

    #[test]
    fn test_naming_style_from_number() {
        assert_eq!(NamingStyle::try_from(1).unwrap(), NamingStyle::Fmu1);
        assert!(NamingStyle::try_from(2).is_err());
    }
}
