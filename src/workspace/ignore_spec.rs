use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use super::error::WorkspaceError;
use super::git::GitClient;
use super::Workspace;

pub const IGNORE_FILE: &str = ".gitignore";

/// Where the patterns of an [`IgnoreSpec`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoreSource {
    File(Utf8PathBuf),
    Defaults,
}

/// Compiled gitignore matcher anchored at a directory.
#[derive(Debug)]
pub struct IgnoreSpec {
    matcher: Gitignore,
    source: IgnoreSource,
}

impl IgnoreSpec {
    /// `path` is either relative to the directory the spec was built for or
    /// an absolute path under it; absolute paths elsewhere are never
    /// ignored. A path also counts as ignored when one of its parent
    /// directories is.
    pub fn is_ignored(&self, path: &Utf8Path, is_dir: bool) -> bool {
        let path = path.as_std_path();
        let relative = if path.has_root() {
            match path.strip_prefix(self.matcher.path()) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }

    pub fn source(&self) -> &IgnoreSource {
        &self.source
    }
}

impl<G: GitClient> Workspace<'_, G> {
    /// Patterns from `<root>/.gitignore`, or the configured defaults when
    /// there is no such file.
    pub fn ignore_spec(&self, root: &Utf8Path) -> Result<IgnoreSpec, WorkspaceError> {
        match fs::read_dir(root) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                return Err(WorkspaceError::PermissionDenied(root.to_owned()));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(WorkspaceError::filesystem(root, err)),
        }

        let mut builder = GitignoreBuilder::new(root);
        let ignore_file = root.join(IGNORE_FILE);

        let source = if ignore_file.is_file() {
            if let Some(err) = builder.add(&ignore_file) {
                // Partial errors: the valid lines are still compiled.
                warn!("skipping malformed patterns in {ignore_file}: {err}");
            }
            IgnoreSource::File(ignore_file.clone())
        } else {
            for line in &self.config.default_ignore {
                if let Err(err) = builder.add_line(None, line) {
                    warn!("skipping default ignore pattern {line:?}: {err}");
                }
            }
            IgnoreSource::Defaults
        };

        let matcher = builder
            .build()
            .map_err(|source| WorkspaceError::InvalidIgnore {
                path: ignore_file,
                source,
            })?;
        debug!("compiled {} ignore patterns for {root}", matcher.len());

        Ok(IgnoreSpec { matcher, source })
    }
}
