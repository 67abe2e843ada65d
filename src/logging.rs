//! Logging setup with `tracing` and `tracing-subscriber`.
//!
//! The interactive views own the terminal, so they log to a file. Print-only
//! commands log to stderr. `QDECK_LOG` overrides the level with a full
//! `EnvFilter` directive.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

pub const ENV_VAR: &str = "QDECK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub target: LogTarget,
}

impl LogConfig {
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(format!("qdeck={}", self.level.as_str())))
    }
}

pub fn init(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(false);
    match &config.target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    }
    .map_err(|err| anyhow::anyhow!("logging already initialised: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_to_crate() {
        let config = LogConfig {
            level: LogLevel::Debug,
            target: LogTarget::Stderr,
        };
        if std::env::var(ENV_VAR).is_err() {
            assert_eq!(config.filter().to_string(), "qdeck=debug");
        }
    }
}
