use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::{debug, info};

use super::error::WorkspaceError;
use super::git::GitClient;
use super::ignore_spec::IGNORE_FILE;
use super::utils::{has_extension, in_tests_dir, is_safe_relative, keep_dir};
use super::Workspace;

impl<G: GitClient> Workspace<'_, G> {
    /// Source files under `root`, relative to it, in discovery order.
    ///
    /// With `use_git`, the candidates come from `git ls-files` and are then
    /// filtered through the repository's `.gitignore` once more. Anything
    /// under the tests directory is left out either way.
    pub fn python_files(
        &self,
        root: &Utf8Path,
        use_git: bool,
    ) -> Result<Vec<Utf8PathBuf>, WorkspaceError> {
        let root = resolve_root(root)?;

        let files = if use_git {
            self.git_files(&root)?
        } else {
            self.walk_files(&root)
        };

        info!(
            "found {} source files in {root} ({} mode)",
            files.len(),
            if use_git { "git" } else { "plain" }
        );
        Ok(files)
    }

    fn walk_files(&self, root: &Utf8Path) -> Vec<Utf8PathBuf> {
        let config = self.config.clone();
        let mut files = Vec::new();

        for entry in WalkBuilder::new(root)
            .standard_filters(false)
            .filter_entry(move |e| {
                if !e.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                Utf8Path::from_path(e.path())
                    .map(|p| keep_dir(&config, p, e.depth()))
                    .unwrap_or(true)
            })
            .build()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!("skipping entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Some(path) = Utf8Path::from_path(entry.path()) else {
                debug!("skipping non UTF-8 path {}", entry.path().display());
                continue;
            };
            if !has_extension(self.config, path) {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(root) {
                files.push(relative.to_owned());
            }
        }

        files
    }

    fn git_files(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, WorkspaceError> {
        if !self.git.is_available() {
            return Err(WorkspaceError::ToolUnavailable);
        }

        let top =
            find_repo_top(root).ok_or_else(|| WorkspaceError::NotARepository(root.to_owned()))?;
        if !top.join(IGNORE_FILE).is_file() {
            return Err(WorkspaceError::MissingIgnoreFile(top.to_owned()));
        }

        let listed = self
            .git
            .list_files(root)
            .map_err(WorkspaceError::FilterFailed)?;
        debug!("git listed {} paths under {root}", listed.len());

        let spec = self.ignore_spec(top)?;
        let prefix = root.strip_prefix(top).unwrap_or(Utf8Path::new(""));

        Ok(listed
            .into_iter()
            .filter(|p| is_safe_relative(p))
            .filter(|p| has_extension(self.config, p))
            .filter(|p| !in_tests_dir(self.config, p))
            .filter(|p| {
                let ignored = spec.is_ignored(&prefix.join(p), false);
                if ignored {
                    debug!("{p} excluded by {:?}", spec.source());
                }
                !ignored
            })
            // --cached still lists files deleted from the working tree.
            .filter(|p| root.join(p).is_file())
            .collect())
    }
}

fn resolve_root(root: &Utf8Path) -> Result<Utf8PathBuf, WorkspaceError> {
    let resolved = root.canonicalize_utf8().map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => WorkspaceError::NotFound(root.to_owned()),
        io::ErrorKind::PermissionDenied => WorkspaceError::PermissionDenied(root.to_owned()),
        _ => WorkspaceError::filesystem(root, err),
    })?;
    if !resolved.is_dir() {
        return Err(WorkspaceError::NotADirectory(root.to_owned()));
    }
    Ok(resolved)
}

/// Nearest ancestor of `dir` (itself included) holding a `.git` entry.
/// `.git` may be a file for worktrees and submodules.
fn find_repo_top(dir: &Utf8Path) -> Option<&Utf8Path> {
    dir.ancestors().find(|d| d.join(".git").exists())
}
