//! FMU run context
//!
//! Inside an FMU case, every realization runs in a folder like
//! `<case>/realization-<n>/<iteration>/`, with RMS working further down in
//! `rms/model`. This module recognizes that layout and collects what it
//! says about the run: case, iteration, realization and its parameters.

mod case;
mod run_context;

pub use case::{CASE_METADATA_PATH, CaseInfo, CaseMetadata, initialize_case};
pub use run_context::RunContext;
