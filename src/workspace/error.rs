use std::io;
use std::process::ExitStatus;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure of a single `git` invocation.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git {args:?}: {source}")]
    Spawn {
        args: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("git {args:?} failed with status {status}: {stderr}")]
    Status {
        args: Vec<String>,
        status: ExitStatus,
        stderr: String,
    },

    #[error("git printed a path that is not valid UTF-8")]
    NonUtf8Output,
}

/// Everything the workspace operations can fail with. One variant per
/// condition so the CLI can branch on the kind.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("{0} not found")]
    NotFound(Utf8PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(Utf8PathBuf),

    #[error("{0} is not writable")]
    NotWritable(Utf8PathBuf),

    #[error("permission denied while reading {0}")]
    PermissionDenied(Utf8PathBuf),

    #[error("Git is not installed")]
    ToolUnavailable,

    #[error("{0} is not a git repo")]
    NotARepository(Utf8PathBuf),

    #[error("{0} does not have a gitignore")]
    MissingIgnoreFile(Utf8PathBuf),

    #[error("Could not filter files using git")]
    FilterFailed(#[source] GitError),

    #[error("invalid ignore patterns in {path}: {source}")]
    InvalidIgnore {
        path: Utf8PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("refusing to scaffold {0}: path must be relative and stay inside the project")]
    UnsafePath(Utf8PathBuf),

    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WorkspaceError {
    pub(crate) fn filesystem(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Guidance for the user, when there is something they can do about it.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound(_) | Self::NotADirectory(_) => {
                Some("Pass an existing project directory with --root.")
            }
            Self::NotWritable(_) | Self::PermissionDenied(_) => {
                Some("Check the directory permissions and try again.")
            }
            Self::ToolUnavailable => Some("Install git or run without --git."),
            Self::NotARepository(_) => {
                Some("Run inside a git repository (`git init`) or run without --git.")
            }
            Self::MissingIgnoreFile(_) => {
                Some("Add a .gitignore at the repository root or run without --git.")
            }
            Self::FilterFailed(_) => Some("Check that `git ls-files` works in this directory."),
            Self::InvalidIgnore { .. } => Some("Fix the patterns in .gitignore."),
            Self::UnsafePath(_) | Self::Filesystem { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_cli_wording() {
        assert_eq!(WorkspaceError::ToolUnavailable.to_string(), "Git is not installed");
        let err = WorkspaceError::FilterFailed(GitError::NonUtf8Output);
        assert_eq!(err.to_string(), "Could not filter files using git");
        let err = WorkspaceError::NotARepository(Utf8PathBuf::from("/tmp/x"));
        assert!(err.to_string().contains("not a git repo"));
    }

    #[test]
    fn every_actionable_kind_has_a_hint() {
        assert!(WorkspaceError::ToolUnavailable.hint().is_some());
        assert!(
            WorkspaceError::MissingIgnoreFile(Utf8PathBuf::from("."))
                .hint()
                .is_some()
        );
        assert!(WorkspaceError::UnsafePath(Utf8PathBuf::from("../a.py")).hint().is_none());
    }
}
