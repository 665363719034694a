use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file path.
pub const LOG_ENV_VAR: &str = "TRANSLATE_SEARCH_LOG";

/// Initialize tracing.
///
/// Logs go to a file when `log_file` is given or `TRANSLATE_SEARCH_LOG` is
/// set, otherwise to stderr so they never mix with rendered states on stdout.
///
/// Log files are created with unique names to prevent conflicts when
/// multiple instances run simultaneously: `{path}.{timestamp}.{pid}`
pub fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = log_file
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_ENV_VAR).map(PathBuf::from));

    let Some(log_path) = log_path else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339());
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: Failed to create log file {}: {}",
                unique_path.display(),
                e
            );
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn unique_log_path(base: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", base.display(), timestamp, pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_log_path_appends_timestamp_and_pid() {
        let path = unique_log_path(Path::new("/tmp/search.log"));
        let name = path.to_string_lossy();
        assert!(name.starts_with("/tmp/search.log."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
    }
}
