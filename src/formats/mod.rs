//! File format writers
//!
//! Objects are written through a [`FormatWriter`] looked up by class and
//! format name in a [`FormatRegistry`]. The registry ships with the text
//! formats (`irap_ascii`, `csv`); binary formats such as `segy`, `roff` or
//! `irap_binary` come from whatever geometry library the caller uses,
//! registered as additional writers.

mod csv;
mod irap_ascii;

pub use csv::CsvWriter;
pub use irap_ascii::IrapAsciiWriter;

use crate::objects::{DataClass, GeoObject};
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Writes objects of some classes in one file format
///
/// # Example
/// ```
/// use fmu_dataio::formats::FormatWriter;
/// use fmu_dataio::objects::{DataClass, GeoObject};
/// use eyre::Result;
/// use std::path::Path;
///
/// /// Writes only the cube geometry, as a placeholder for real SEG-Y output
/// struct SegyHeaderWriter;
///
/// impl FormatWriter for SegyHeaderWriter {
///     fn format(&self) -> &str {
///         "segy"
///     }
///
///     fn supports(&self, class: DataClass) -> bool {
///         class == DataClass::Cube
///     }
///
///     fn write(&self, object: &GeoObject, path: &Path) -> Result<()> {
///         std::fs::write(path, object.spec().to_string())?;
///         Ok(())
///     }
/// }
/// ```
pub trait FormatWriter: Send + Sync {
    /// Format name, e.g. `irap_ascii`
    fn format(&self) -> &str;

    /// Whether objects of `class` can be written
    fn supports(&self, class: DataClass) -> bool;

    /// Write `object` to `path`
    fn write(&self, object: &GeoObject, path: &Path) -> Result<()>;
}

/// File extension (with leading dot) for a class written in `format`
pub fn extension(class: DataClass, format: &str) -> Result<&'static str> {
    let ext = match (class, format) {
        (DataClass::Surface, "irap_binary") => ".gri",
        (DataClass::Surface, "irap_ascii") => ".irap",
        (DataClass::Cube, "segy") => ".segy",
        (DataClass::Grid | DataClass::GridProperty, "roff") => ".roff",
        (DataClass::Polygons, "csv") => ".csv",
        (DataClass::Polygons, "irap_ascii") => ".pol",
        (DataClass::Table, "csv") => ".csv",
        (DataClass::Table, "arrow") => ".arrow",
        _ => eyre::bail!("Unsupported file format {} for class {}", format, class),
    };
    Ok(ext)
}

/// File format used per class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFormats {
    pub surface: String,
    pub cube: String,
    pub grid: String,
    pub polygons: String,
    pub table: String,
}

impl Default for FileFormats {
    fn default() -> Self {
        Self {
            surface: "irap_binary".to_string(),
            cube: "segy".to_string(),
            grid: "roff".to_string(),
            polygons: "csv".to_string(),
            table: "csv".to_string(),
        }
    }
}

impl FileFormats {
    pub fn for_class(&self, class: DataClass) -> &str {
        match class {
            DataClass::Surface => &self.surface,
            DataClass::Cube => &self.cube,
            DataClass::Grid | DataClass::GridProperty => &self.grid,
            DataClass::Polygons => &self.polygons,
            DataClass::Table => &self.table,
        }
    }
}

/// Lookup of writers by class and format
pub struct FormatRegistry {
    writers: Vec<Box<dyn FormatWriter>>,
}

impl FormatRegistry {
    /// Registry without any writers
    pub fn empty() -> Self {
        Self {
            writers: Vec::new(),
        }
    }

    /// Registry with the built-in text writers
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(IrapAsciiWriter);
        registry.register(CsvWriter);
        registry
    }

    /// Add a writer. Later registrations win over earlier ones.
    pub fn register(&mut self, writer: impl FormatWriter + 'static) {
        self.writers.push(Box::new(writer));
    }

    pub fn find(&self, class: DataClass, format: &str) -> Result<&dyn FormatWriter> {
        self.writers
            .iter()
            .rev()
            .find(|w| w.format() == format && w.supports(class))
            .map(|w| w.as_ref())
            .ok_or_else(|| {
                eyre::eyre!(
                    "No writer registered for {} in format {}",
                    class,
                    format
                )
            })
    }

    /// Names of all registered formats
    pub fn formats(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.writers.iter().map(|w| w.format()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
