/// Read-only knobs for detection, enumeration and scaffolding.
///
/// `Default` carries the Python conventions. A `Workspace` borrows one of
/// these for its whole lifetime.
#[derive(Clone, Debug)]
pub struct WorkspaceConfig {
    /// Files whose presence directly under the root marks a Python project.
    pub marker_files: Vec<String>,
    /// Directories (virtual environments) that mark a Python project.
    pub marker_dirs: Vec<String>,
    /// Patterns used when the root has no `.gitignore`, in precedence order.
    pub default_ignore: Vec<String>,
    /// Directory names pruned from plain walks at any depth, on top of the
    /// top-level tests directory. Empty unless a caller opts in.
    pub prune_dirs: Vec<String>,
    /// Source extension, without the dot.
    pub extension: String,
    /// Name of the test-output directory created under the root.
    pub tests_dir: String,
    /// Prefix prepended to every scaffolded file name.
    pub test_prefix: String,
}

const MARKER_FILES: &[&str] = &[
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "Pipfile",
    "Pipfile.lock",
    "poetry.lock",
    "uv.lock",
    ".python-version",
];

const MARKER_DIRS: &[&str] = &["venv", ".venv", "env", ".env"];

const DEFAULT_IGNORE: &[&str] = &[
    "__pycache__/",
    "*.py[cod]",
    "*$py.class",
    "*.so",
    "build/",
    "dist/",
    "*.egg-info/",
    ".eggs/",
    ".venv/",
    "venv/",
    "env/",
    "ENV/",
    ".env/",
    ".tox/",
    ".nox/",
    ".pytest_cache/",
    ".mypy_cache/",
    ".ruff_cache/",
    "htmlcov/",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        let tests_dir = "tests".to_string();
        let mut default_ignore = owned(DEFAULT_IGNORE);
        default_ignore.push(format!("/{tests_dir}/"));

        Self {
            marker_files: owned(MARKER_FILES),
            marker_dirs: owned(MARKER_DIRS),
            default_ignore,
            prune_dirs: Vec::new(),
            extension: "py".to_string(),
            tests_dir,
            test_prefix: "test_".to_string(),
        }
    }
}
