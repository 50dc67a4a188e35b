use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose own logging is only interesting when something is wrong.
const QUIET_DEPENDENCIES: &[&str] = &["reqwest", "rustls", "hyper_util"];

/// Install the global subscriber.
///
/// Console output belongs to the commands, so stderr only carries warnings
/// unless `verbose` is set or `RUST_LOG` says otherwise. With `log_file`, a
/// daily-rotated JSON copy of every event is written next to it.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    let file_layer = log_file.map(|log_path| {
        let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
        let _ = std::fs::create_dir_all(dir);
        let prefix = log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("seller.log"));

        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, prefix))
            .with_ansi(false)
            .json()
            .with_current_span(false)
    });

    // A second call keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    let mut directives = format!("seller_console={}", level);
    for dependency in QUIET_DEPENDENCIES {
        directives.push_str(&format!(",{}=warn", dependency));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(false),
            "seller_console=warn,reqwest=warn,rustls=warn,hyper_util=warn"
        );
        assert!(default_directives(true).starts_with("seller_console=debug,"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false, None);
        init(true, None);
    }

    #[test]
    fn test_init_with_file_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs").join("seller.log");

        init(true, Some(log_path.clone()));
        tracing::info!("written to the rolling file");

        assert!(log_path.parent().unwrap().exists());
    }
}
