//! `qdeck.conf`: a small hand-editable `key: value` file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

pub const CONFIG_FILE: &str = "qdeck.conf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Raise the level by `steps` (one per `-v`).
    pub fn raised(self, steps: u8) -> Self {
        let order = [
            Self::Error,
            Self::Warn,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ];
        let idx = order.iter().position(|l| *l == self).unwrap_or(1);
        order[(idx + steps as usize).min(order.len() - 1)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Data directory, relative to the config file's directory unless absolute.
    pub data_dir: Option<PathBuf>,
    /// How many tags a list row shows before collapsing the rest into `+N`.
    pub tag_preview: usize,
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            tag_preview: 3,
            log_file: None,
            log_level: LogLevel::default(),
        }
    }
}

pub fn parse(input: &str) -> Result<Config> {
    let mut config = Config::default();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            bail!("expected `key: value` at line {}", idx + 1);
        };
        let value = value.trim();
        match key.trim() {
            "data_dir" => config.data_dir = non_empty(value).map(PathBuf::from),
            "log_file" => config.log_file = non_empty(value).map(PathBuf::from),
            "tag_preview" => {
                config.tag_preview = value
                    .parse()
                    .with_context(|| format!("invalid tag_preview at line {}", idx + 1))?;
            }
            "log_level" => {
                config.log_level = LogLevel::parse(value).with_context(|| {
                    format!(
                        "invalid log_level {:?} at line {} (expected error|warn|info|debug|trace)",
                        value,
                        idx + 1
                    )
                })?;
            }
            _ => {}
        }
    }
    Ok(config)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

pub fn serialize_config(config: &Config) -> String {
    let path = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };
    format!(
        "\
# qdeck configuration

# Directory holding index.json and <id>.json (default: data/)
data_dir: {}

# Tags shown per row in the question list before \"+N\"
tag_preview: {}

# Where the interactive views write their log (default: qdeck.log)
log_file: {}

# Log level: error | warn | info | debug | trace
log_level: {}
",
        path(&config.data_dir),
        config.tag_preview,
        path(&config.log_file),
        config.log_level.as_str(),
    )
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Read `<root>/qdeck.conf`, or defaults when it does not exist.
pub fn load(root: &Path) -> Result<Config> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    parse(&content).with_context(|| format!("in {}", path.display()))
}
