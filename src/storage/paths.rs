//! Output path resolution for exported files and their sidecars

use eyre::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Where an export is anchored and how missing folders are handled
#[derive(Debug, Clone)]
pub struct PathContext {
    /// Working folder that relative destinations are resolved against
    pub pwd: PathBuf,
    /// Create the destination folder when it does not exist
    pub createfolder: bool,
    /// Realization folder name (e.g. `realization-0`) when running inside a case
    pub realization_folder: Option<String>,
    /// Iteration folder name (e.g. `iter-0`) when running inside a case
    pub iteration_folder: Option<String>,
}

impl PathContext {
    pub fn new(pwd: impl AsRef<Path>) -> Self {
        Self {
            pwd: pwd.as_ref().to_path_buf(),
            createfolder: true,
            realization_folder: None,
            iteration_folder: None,
        }
    }
}

/// The resolved paths of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Data file path as joined from the working folder
    pub path: PathBuf,
    /// Metadata sidecar path (`.<stem><ext>.yml`), normalized
    pub metapath: PathBuf,
    /// Path relative to the case root, always with `/` separators
    pub relpath: String,
    /// Normalized absolute data file path
    pub abspath: PathBuf,
}

/// Resolve data, metadata and relative paths for an export.
///
/// Unless `dryrun` is set, a missing destination folder is created when
/// `ctx.createfolder` allows it and is an error otherwise.
pub fn verify_path(
    ctx: &PathContext,
    filedest: &Path,
    filename: &str,
    ext: &str,
    dryrun: bool,
) -> Result<ExportPaths> {
    log::debug!("Incoming filedest is {}", filedest.display());
    log::debug!("Incoming filename is {}", filename);
    log::debug!("Incoming ext is {}", ext);

    let filename = filename.to_lowercase();
    let folder = ctx.pwd.join(filedest);
    let path = folder.join(format!("{}{}", filename, ext));
    let abspath = normalize_path(&absolute(&path)?);

    log::debug!("path is {}", path.display());

    if !dryrun && let Some(parent) = path.parent() {
        if parent.exists() {
            log::info!("Folder exists");
        } else if ctx.createfolder {
            log::info!("No such folder, will create");
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create folder: {}", parent.display()))?;
        } else {
            eyre::bail!("Folder {} is not present.", parent.display());
        }
    }

    let metapath = normalize_path(&absolute(
        &folder.join(format!(".{}{}.yml", filename, ext)),
    )?);

    let mut relpath = filedest
        .to_string_lossy()
        .replace('\\', "/")
        .replace("../", "");
    // An absolute destination is already rooted, so it gets no run prefix
    if let (Some(real), Some(iter)) = (&ctx.realization_folder, &ctx.iteration_folder)
        && !filedest.is_absolute()
    {
        relpath = join_relative(&format!("{}/{}", real, iter), &relpath);
    }
    let relpath = join_relative(&relpath, &format!("{}{}", filename, ext));

    log::info!("Full path to the actual file is: {}", abspath.display());
    log::info!("Full path to the metadata file (if used) is: {}", metapath.display());
    log::info!("Relative path to actual file: {}", relpath);

    Ok(ExportPaths {
        path,
        metapath,
        relpath,
        abspath,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().with_context(|| "Failed to read current directory")?;
        Ok(cwd.join(path))
    }
}

fn join_relative(base: &str, tail: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        tail.to_string()
    } else {
        format!("{}/{}", base, tail)
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_in_plain_folder() {
        let temp = TempDir::new().unwrap();
        let ctx = PathContext::new(temp.path());

        let paths = verify_path(&ctx, Path::new("share/results/maps"), "TopVolantis", ".gri", false)
            .unwrap();

        let folder = temp.path().join("share/results/maps");
        assert!(folder.is_dir());
        assert_eq!(paths.path, folder.join("topvolantis.gri"));
        assert_eq!(paths.abspath, folder.join("topvolantis.gri"));
        assert_eq!(paths.metapath, folder.join(".topvolantis.gri.yml"));
        assert_eq!(paths.relpath, "share/results/maps/topvolantis.gri");
    }

    #[test]
    fn test_relpath_inside_realization() {
        let temp = TempDir::new().unwrap();
        let run = temp.path().join("mycase/realization-0/iter-0/rms/model");
        std::fs::create_dir_all(&run).unwrap();

        let ctx = PathContext {
            pwd: run.clone(),
            createfolder: true,
            realization_folder: Some("realization-0".to_string()),
            iteration_folder: Some("iter-0".to_string()),
        };

        let paths = verify_path(
            &ctx,
            Path::new("../../share/results/cubes"),
            "volantis--what_descr",
            ".segy",
            false,
        )
        .unwrap();

        assert_eq!(
            paths.relpath,
            "realization-0/iter-0/share/results/cubes/volantis--what_descr.segy"
        );
        assert_eq!(
            paths.abspath,
            temp.path()
                .join("mycase/realization-0/iter-0/share/results/cubes/volantis--what_descr.segy")
        );
        assert!(paths.abspath.parent().unwrap().is_dir());
    }

    #[test]
    fn test_missing_folder_without_createfolder() {
        let temp = TempDir::new().unwrap();
        let mut ctx = PathContext::new(temp.path());
        ctx.createfolder = false;

        let err = verify_path(&ctx, Path::new("maps"), "x", ".gri", false).unwrap_err();
        assert!(err.to_string().contains("is not present"));
        assert!(!temp.path().join("maps").exists());
    }

    #[test]
    fn test_dryrun_does_not_create() {
        let temp = TempDir::new().unwrap();
        let mut ctx = PathContext::new(temp.path());
        ctx.createfolder = false;

        let paths = verify_path(&ctx, Path::new("maps"), "x", ".gri", true).unwrap();
        assert_eq!(paths.relpath, "maps/x.gri");
        assert!(!temp.path().join("maps").exists());
    }

    #[test]
    fn test_absolute_destination_replaces_pwd() {
        let temp = TempDir::new().unwrap();
        let ctx = PathContext::new("/somewhere/else");
        let dest = temp.path().join("cubes");

        let paths = verify_path(&ctx, &dest, "testcube", ".segy", false).unwrap();
        assert_eq!(paths.metapath, dest.join(".testcube.segy.yml"));
    }

    #[test]
    fn test_absolute_destination_inside_realization() {
        let temp = TempDir::new().unwrap();
        let ctx = PathContext {
            pwd: temp.path().join("mycase/realization-0/iter-0/rms/model"),
            createfolder: true,
            realization_folder: Some("realization-0".to_string()),
            iteration_folder: Some("iter-0".to_string()),
        };
        let dest = temp.path().join("elsewhere/cubes");

        let paths = verify_path(&ctx, &dest, "testcube", ".segy", false).unwrap();
        assert!(!paths.relpath.starts_with("realization-0/iter-0"));
        assert!(paths.relpath.ends_with("elsewhere/cubes/testcube.segy"));
        assert_eq!(paths.abspath, dest.join("testcube.segy"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/c/../../d/./e")),
            PathBuf::from("/a/d/e")
        );
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }
}
