//! Project inspection and test scaffolding.
//!
//! A [`Workspace`] borrows a [`WorkspaceConfig`] and owns a [`GitClient`];
//! detection, enumeration and scaffolding are methods on it, split across
//! the submodules below.

pub mod config;
mod detect;
pub mod error;
mod files;
pub mod git;
pub mod ignore_spec;
mod scaffold;
pub(crate) mod utils;

use camino::{Utf8Path, Utf8PathBuf};

pub use config::WorkspaceConfig;
pub use error::WorkspaceError;
pub use git::{GitCli, GitClient};
pub use scaffold::ScaffoldSummary;

pub struct Workspace<'a, G = GitCli> {
    config: &'a WorkspaceConfig,
    git: G,
}

impl<'a> Workspace<'a, GitCli> {
    pub fn new(config: &'a WorkspaceConfig) -> Self {
        Self::with_git(config, GitCli::default())
    }
}

impl<'a, G: GitClient> Workspace<'a, G> {
    pub fn with_git(config: &'a WorkspaceConfig, git: G) -> Self {
        Self { config, git }
    }

    /// Path of the tests directory `create_tests_directory` makes for `root`.
    pub fn tests_root(&self, root: &Utf8Path) -> Utf8PathBuf {
        root.join(&self.config.tests_dir)
    }
}
