//! Detection of the realization and iteration folders

use crate::storage::{normalize_path, read_parameters_txt};
use eyre::{Context, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const REALIZATION_PATTERN: &str = r"^realization-(\d+)$";
const ITERATION_PATTERN: &str = r"^iter-(\d+)$";

/// Where in an FMU case an export is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Root folder of the case
    pub case_path: PathBuf,
    /// Realization folder name, e.g. `realization-0`
    pub realization_folder: String,
    pub realization_id: u32,
    /// Iteration folder name, e.g. `iter-0` or `pred`
    pub iteration_folder: String,
    pub iteration_id: u32,
}

impl RunContext {
    /// Find the realization/iteration pair closest to `folder`.
    ///
    /// Returns `None` when `folder` is not inside a realization.
    ///
    /// # Example
    /// ```
    /// use fmu_dataio::fmu::RunContext;
    /// use std::path::Path;
    ///
    /// let ctx = RunContext::detect(Path::new("/scratch/ff/mycase/realization-3/iter-1/rms/model"))
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(ctx.case_path, Path::new("/scratch/ff/mycase"));
    /// assert_eq!(ctx.realization_id, 3);
    /// assert_eq!(ctx.iteration_folder, "iter-1");
    /// ```
    pub fn detect(folder: &Path) -> Result<Option<Self>> {
        let realization_re =
            Regex::new(REALIZATION_PATTERN).with_context(|| "Invalid realization pattern")?;
        let iteration_re =
            Regex::new(ITERATION_PATTERN).with_context(|| "Invalid iteration pattern")?;

        let folder = normalize_path(folder);
        let parts: Vec<&str> = folder
            .iter()
            .map(|part| part.to_str().unwrap_or_default())
            .collect();

        // The innermost realization folder that has an iteration folder below it
        let found = parts
            .iter()
            .enumerate()
            .rev()
            .filter(|(idx, _)| idx + 1 < parts.len())
            .find_map(|(idx, part)| {
                realization_re
                    .captures(part)
                    .and_then(|caps| caps[1].parse::<u32>().ok())
                    .map(|id| (idx, id))
            });

        let Some((idx, realization_id)) = found else {
            log::debug!("{} is not inside a realization folder", folder.display());
            return Ok(None);
        };

        let iteration_folder = parts[idx + 1].to_string();
        let iteration_id = iteration_re
            .captures(&iteration_folder)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .unwrap_or(0);

        let case_path: PathBuf = folder.iter().take(idx).collect();

        let ctx = Self {
            case_path,
            realization_folder: parts[idx].to_string(),
            realization_id,
            iteration_folder,
            iteration_id,
        };
        log::debug!("Detected run context {:?}", ctx);
        Ok(Some(ctx))
    }

    /// The realization's run path, `<case>/<realization>/<iteration>`
    pub fn runpath(&self) -> PathBuf {
        self.case_path
            .join(&self.realization_folder)
            .join(&self.iteration_folder)
    }

    /// Parameters from the run path's `parameters.txt`, when present
    pub fn parameters(&self) -> Result<Option<Map<String, Value>>> {
        let path = self.runpath().join("parameters.txt");
        if !path.exists() {
            log::debug!("No parameters file at {}", path.display());
            return Ok(None);
        }
        read_parameters_txt(&path).map(Some)
    }
}
