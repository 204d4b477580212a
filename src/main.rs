use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args as ClapArgs, Parser, Subcommand};

mod logging;
mod workspace;

use workspace::{ScaffoldSummary, Workspace, WorkspaceConfig, WorkspaceError};

/// Above this many files only the count is printed.
const LIST_LIMIT: usize = 15;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scaffold a pytest test tree that mirrors a Python project"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only print errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Log every file decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create tests/ with one empty test_<name>.py per Python source file
    Init(InitArgs),
}

#[derive(ClapArgs, Debug)]
struct InitArgs {
    /// Use git for tracking relevant python files
    #[arg(short, long)]
    git: bool,

    /// Project root to scan (defaults to current directory)
    #[arg(long)]
    root: Option<String>,

    /// Scaffold without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// List the files that would get tests, then stop
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Command::Init(args) => init(&args),
    }
}

fn init(args: &InitArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let root = resolve_root(args.root.as_deref(), &cwd)?;

    let config = WorkspaceConfig::default();
    let workspace = Workspace::new(&config);

    if !workspace.is_python_project(&root) {
        println!("❌ Please call ptm from within a Python project.");
        return Ok(());
    }
    println!("✅ Verified Python project.");

    let files = with_hint(workspace.python_files(&root, args.git))?;
    print_files(&files);

    if args.dry_run {
        return Ok(());
    }

    if !args.yes && !confirm("Looks good?")? {
        println!("Cleaning up.");
        return Ok(());
    }

    let tests_root = with_hint(workspace.create_tests_directory(&root))?;
    let summary = with_hint(workspace.create_test_files(&tests_root, &files))?;
    print_summary(&root, &summary);

    Ok(())
}

/// Prints the actionable hint for a workspace error before handing it to
/// anyhow for the exit status.
fn with_hint<T>(result: Result<T, WorkspaceError>) -> Result<T> {
    result.map_err(|err| {
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        anyhow::Error::new(err)
    })
}

fn resolve_root(explicit: Option<&str>, cwd: &Path) -> Result<Utf8PathBuf> {
    let path = match explicit {
        Some(raw) => {
            let candidate = PathBuf::from(shellexpand::tilde(raw).into_owned());
            if candidate.is_absolute() {
                candidate
            } else {
                cwd.join(candidate)
            }
        }
        None => cwd.to_path_buf(),
    };

    Utf8PathBuf::from_path_buf(path)
        .map_err(|_| anyhow::anyhow!("Project root must be valid UTF-8"))
}

fn print_files(files: &[Utf8PathBuf]) {
    if files.is_empty() {
        println!("No python files found.");
    } else if files.len() > LIST_LIMIT {
        println!("Found {} relevant files.", files.len());
    } else {
        println!("Found these python files");
        for file in files {
            println!("{file}");
        }
    }
    println!();
}

fn print_summary(root: &Utf8Path, summary: &ScaffoldSummary) {
    let shown = |p: &Utf8PathBuf| p.strip_prefix(root).unwrap_or(p.as_path()).to_string();
    for path in &summary.created {
        println!("created {}", shown(path));
    }
    println!(
        "Created {} test files, kept {} existing.",
        summary.created.len(),
        summary.existing.len()
    );
}

fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut io::stdout())
}

/// Yes/no question defaulting to no. End of input counts as no.
fn confirm_with(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    let mut line = String::new();
    loop {
        write!(out, "{prompt} [y/N]: ")?;
        out.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Failed to read confirmation")?;
        if read == 0 {
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}
