use std::fs::{self, OpenOptions};
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use super::error::WorkspaceError;
use super::git::GitClient;
use super::utils::{is_safe_relative, test_path_for};
use super::Workspace;

/// Outcome of [`Workspace::create_test_files`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScaffoldSummary {
    /// Test files written by this run.
    pub created: Vec<Utf8PathBuf>,
    /// Test files that were already there and were left alone.
    pub existing: Vec<Utf8PathBuf>,
}

impl<G: GitClient> Workspace<'_, G> {
    /// Creates `<root>/tests`. Calling it again is a no-op.
    pub fn create_tests_directory(&self, root: &Utf8Path) -> Result<Utf8PathBuf, WorkspaceError> {
        check_writable_dir(root)?;

        let tests_root = self.tests_root(root);
        match fs::create_dir(&tests_root) {
            Ok(()) => debug!("created {tests_root}"),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && tests_root.is_dir() => {
                debug!("{tests_root} already exists");
            }
            Err(err) => return Err(WorkspaceError::filesystem(tests_root, err)),
        }
        Ok(tests_root)
    }

    /// One empty `test_<name>` file per source path, mirrored under
    /// `tests_root`. Existing test files are never truncated.
    pub fn create_test_files<P: AsRef<Utf8Path>>(
        &self,
        tests_root: &Utf8Path,
        sources: &[P],
    ) -> Result<ScaffoldSummary, WorkspaceError> {
        check_writable_dir(tests_root)?;

        let mut targets = Vec::with_capacity(sources.len());
        for source in sources {
            let source = source.as_ref();
            let target = is_safe_relative(source)
                .then(|| test_path_for(self.config, source))
                .flatten()
                .ok_or_else(|| WorkspaceError::UnsafePath(source.to_owned()))?;
            targets.push(tests_root.join(target));
        }

        let mut summary = ScaffoldSummary::default();
        for target in targets {
            if let Some(dir) = target.parent() {
                fs::create_dir_all(dir).map_err(|err| WorkspaceError::filesystem(dir, err))?;
            }

            match OpenOptions::new().write(true).create_new(true).open(&target) {
                Ok(_) => {
                    debug!("created {target}");
                    summary.created.push(target);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists && target.is_file() => {
                    debug!("keeping existing {target}");
                    summary.existing.push(target);
                }
                Err(err) => return Err(WorkspaceError::filesystem(target, err)),
            }
        }

        info!(
            "scaffolded {} test files under {tests_root} ({} already present)",
            summary.created.len(),
            summary.existing.len()
        );
        Ok(summary)
    }
}

/// Not found, then not a directory, then not writable. Writability is
/// probed with a throwaway file so it reflects effective permissions.
fn check_writable_dir(path: &Utf8Path) -> Result<(), WorkspaceError> {
    let meta = fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => WorkspaceError::NotFound(path.to_owned()),
        io::ErrorKind::PermissionDenied => WorkspaceError::NotWritable(path.to_owned()),
        _ => WorkspaceError::filesystem(path, err),
    })?;
    if !meta.is_dir() {
        return Err(WorkspaceError::NotADirectory(path.to_owned()));
    }

    tempfile::Builder::new()
        .prefix(".ptm-probe")
        .tempfile_in(path)
        .map(drop)
        .map_err(|err| match err.kind() {
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                WorkspaceError::NotWritable(path.to_owned())
            }
            _ => WorkspaceError::filesystem(path, err),
        })
}
