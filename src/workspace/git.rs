use std::io;
use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::error::GitError;

/// The slice of git the enumerator needs. Kept narrow so tests can swap in
/// a fake instead of spawning processes.
pub trait GitClient {
    /// Whether the client binary can be launched at all.
    fn is_available(&self) -> bool;

    /// Tracked plus untracked-but-not-ignored files under `dir`, relative
    /// to `dir`.
    fn list_files(&self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, GitError>;
}

/// Shells out to the `git` executable found on PATH.
#[derive(Clone, Debug)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::with_program("git")
    }
}

impl GitCli {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run_git_single(&self, cwd: &Utf8Path, args: &[&str]) -> Result<Vec<u8>, GitError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| GitError::Spawn {
                args: owned_args(args),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Status {
                args: owned_args(args),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl GitClient for GitCli {
    fn is_available(&self) -> bool {
        match Command::new(&self.program).arg("--version").output() {
            Ok(output) => output.status.success(),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    debug!("probing {} failed: {err}", self.program);
                }
                false
            }
        }
    }

    fn list_files(&self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, GitError> {
        let out = self.run_git_single(
            dir,
            &["ls-files", "--cached", "--others", "--exclude-standard", "-z"],
        )?;
        parse_nul_separated(&out)
    }
}

fn owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn parse_nul_separated(out: &[u8]) -> Result<Vec<Utf8PathBuf>, GitError> {
    let mut paths = Vec::new();
    for raw in out.split(|b| *b == 0).filter(|s| !s.is_empty()) {
        let path = std::str::from_utf8(raw).map_err(|_| GitError::NonUtf8Output)?;
        paths.push(Utf8PathBuf::from(path));
    }
    // --cached lists each unmerged path once per stage.
    paths.dedup();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_nul_terminated_output() {
        let paths = parse_nul_separated(b"main.py\0pkg/a b.py\0pkg/a b.py\0").unwrap();
        assert_eq!(
            paths,
            vec![Utf8PathBuf::from("main.py"), Utf8PathBuf::from("pkg/a b.py")]
        );
    }

    #[test]
    fn rejects_non_utf8_paths() {
        let err = parse_nul_separated(b"ok.py\0\xff\xfe.py\0").unwrap_err();
        assert!(matches!(err, GitError::NonUtf8Output));
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let git = GitCli::with_program("ptm-no-such-git-binary");
        assert!(!git.is_available());
    }
}
