use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use super::config::WorkspaceConfig;

/// Whether a plain walk should descend into `path`. `depth` is relative to
/// the walk root, so a nested `tests` package is still walked.
pub(crate) fn keep_dir(config: &WorkspaceConfig, path: &Utf8Path, depth: usize) -> bool {
    if depth == 0 {
        return true;
    }
    let Some(name) = path.file_name() else {
        return true;
    };
    if config.prune_dirs.iter().any(|d| d == name) {
        return false;
    }
    !(depth == 1 && name == config.tests_dir)
}

/// Name ends in `.<extension>`; a bare `.py` counts too.
pub(crate) fn has_extension(config: &WorkspaceConfig, path: &Utf8Path) -> bool {
    path.file_name().is_some_and(|name| {
        name.strip_suffix(config.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

pub(crate) fn in_tests_dir(config: &WorkspaceConfig, relative: &Utf8Path) -> bool {
    relative
        .components()
        .next()
        .is_some_and(|first| first.as_str() == config.tests_dir)
}

/// Only plain `a/b/c` paths: no root, prefix, `.` or `..` components.
pub(crate) fn is_safe_relative(path: &Utf8Path) -> bool {
    path.file_name().is_some()
        && path
            .components()
            .all(|c| matches!(c, Utf8Component::Normal(_)))
}

/// Mirrored test location for a source path: `a/b/c.py` becomes
/// `a/b/test_c.py`, relative to the tests root.
pub fn test_path_for(config: &WorkspaceConfig, source: &Utf8Path) -> Option<Utf8PathBuf> {
    let name = source.file_name()?;
    let file = format!("{}{name}", config.test_prefix);
    Some(match source.parent() {
        Some(dir) => dir.join(file),
        None => Utf8PathBuf::from(file),
    })
}
