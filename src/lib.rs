//! FMU dataio
//!
//! Export reservoir-modeling data objects to files with standardized names
//! and a YAML metadata sidecar describing each file.

pub mod cli;
pub mod config;
pub mod export;
pub mod fmu;
pub mod formats;
pub mod metadata;
pub mod naming;
pub mod objects;
pub mod storage;
pub mod transform;
pub mod verbosity;

// Re-exports for convenience
pub use config::GlobalConfig;
pub use export::{ExportData, ExportSettings};
pub use fmu::{CaseMetadata, RunContext, initialize_case};
pub use formats::{FormatRegistry, FormatWriter};
pub use objects::{DataClass, GeoObject};
pub use storage::MetaFormat;
pub use transform::Transformer;
pub use verbosity::Verbosity;
