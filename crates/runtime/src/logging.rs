//! Tracing subscriber setup.

use std::path::Path;

use combat_content::RuntimeConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Result, RuntimeError};

/// Keeps the background file writer alive. Dropping it flushes the log file.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber: stderr always, plus `config.log_file`
/// when set.
///
/// `RUST_LOG` overrides `config.log_filter`. Fails if a global subscriber
/// is already installed.
pub fn init(config: &RuntimeConfig) -> Result<LogGuard> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| {
                RuntimeError::Logging(format!("bad filter '{}': {}", config.log_filter, e))
            })?,
    };

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(dir)
                .map_err(|e| RuntimeError::Logging(format!("{}: {}", dir.display(), e)))?;

            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    match &config.log_file {
        Some(path) => tracing::info!("Logging initialized: file={}", path.display()),
        None => tracing::info!("Logging initialized: stderr only"),
    }

    Ok(LogGuard { _file: guard })
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RuntimeError::Logging(format!("{} has no file name", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bare_file_names_into_current_dir() {
        let (dir, name) = split_log_path(Path::new("combat.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "combat.log");

        let (dir, name) = split_log_path(Path::new("logs/run/combat.log")).unwrap();
        assert_eq!(dir, Path::new("logs/run"));
        assert_eq!(name, "combat.log");
    }

    #[test]
    fn rejects_paths_without_file_name() {
        assert!(matches!(
            split_log_path(Path::new("/")),
            Err(RuntimeError::Logging(_))
        ));
    }
}
