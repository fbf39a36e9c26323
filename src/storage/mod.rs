//! File system storage operations
//!
//! This module handles all file I/O around an export:
//! - Output and sidecar path resolution
//! - Metadata sidecar writing
//! - Checksums and derived UUIDs
//! - The legacy `parameters.txt` reader

mod checksum;
mod metadata_file;
mod parameters;
mod paths;

pub use checksum::{md5sum, size, uuid_from_string};
pub use metadata_file::{MetaFormat, export_metadata_file};
pub use parameters::{check_if_number, parse_parameters, read_parameters_txt};
pub use paths::{ExportPaths, PathContext, normalize_path, verify_path};
