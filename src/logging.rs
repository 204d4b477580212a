use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PTM_LOG";

/// Diagnostics go to stderr so stdout stays the user-facing report.
/// `PTM_LOG` (an `EnvFilter` directive) wins over the flags.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::default_level;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(default_level(true, true), "error");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, false), "warn");
    }
}
