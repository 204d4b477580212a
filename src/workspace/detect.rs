use camino::Utf8Path;
use ignore::WalkBuilder;
use tracing::debug;

use super::git::GitClient;
use super::utils::has_extension;
use super::Workspace;

impl<G: GitClient> Workspace<'_, G> {
    /// Marker files first, then virtualenv directories, then any source
    /// file anywhere below `root`. A missing root is simply not a project.
    pub fn is_python_project(&self, root: &Utf8Path) -> bool {
        if let Some(marker) = self
            .config
            .marker_files
            .iter()
            .find(|name| root.join(name).is_file())
        {
            debug!("found marker file {marker} in {root}");
            return true;
        }

        if let Some(marker) = self
            .config
            .marker_dirs
            .iter()
            .find(|name| root.join(name).is_dir())
        {
            debug!("found marker directory {marker} in {root}");
            return true;
        }

        self.contains_source_file(root)
    }

    fn contains_source_file(&self, root: &Utf8Path) -> bool {
        if !root.is_dir() {
            return false;
        }

        for entry in WalkBuilder::new(root).standard_filters(false).build() {
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
            if let Some(path) = Utf8Path::from_path(entry.path()) {
                if has_extension(self.config, path) {
                    debug!("found source file {path}");
                    return true;
                }
            }
        }
        false
    }
}
