use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// Logs always go to stderr so stdout stays clean JSON. With `log_file`
/// set, the same events are also written there without ANSI colors.
pub fn init_logging(log_level: Level, log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => init_file_logging(log_level, path),
        None => init_stderr_logging(log_level),
    }
}

fn env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("autoreply={level_str},autoreply_client={level_str}").into()
    })
}

/// Open the log file fresh; each run starts with an empty file
fn open_log_file(log_file_path: &Path) -> Result<File> {
    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file_path)
        .with_context(|| format!("Failed to open log file {}", log_file_path.display()))
}

fn init_file_logging(level: Level, log_file_path: &Path) -> Result<()> {
    let log_file = open_log_file(log_file_path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn init_stderr_logging(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_starts_empty_each_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("cli.log");

        let mut first = open_log_file(&path).unwrap();
        writeln!(first, "first run").unwrap();
        drop(first);
        assert!(!std::fs::read_to_string(&path).unwrap().is_empty());

        let mut second = open_log_file(&path).unwrap();
        writeln!(second, "second run").unwrap();
        drop(second);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second run\n");
    }
}
