//! Locating the question data and the files that sit next to it.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::{self, Config};

/// Resolved locations for one run.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory holding `qdeck.conf` and the default log file.
    pub root: PathBuf,
    /// Directory holding `index.json` and `<id>.json`.
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }

    pub fn default_log_path(&self) -> PathBuf {
        self.root.join("qdeck.log")
    }
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join("data")
}

/// Walk upward from `start` to the first directory with `data/index.json` or `qdeck.conf`.
pub fn find_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if data_dir(dir).join("index.json").exists() || config::config_path(dir).exists() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => bail!("no question catalog found — pass --data or run `qdeck split`"),
        }
    }
}

/// Resolve the workspace from `start`, honouring an explicit `--data` directory.
pub fn resolve_from(start: &Path, data_override: Option<&Path>) -> Result<Workspace> {
    if let Some(data) = data_override {
        let root = find_root_from(start).unwrap_or_else(|_| start.to_path_buf());
        let config = config::load(&root)?;
        return Ok(Workspace {
            root,
            data_dir: data.to_path_buf(),
            config,
        });
    }

    let root = find_root_from(start)?;
    let config = config::load(&root)?;
    let data_dir = match &config.data_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => root.join(dir),
        None => data_dir(&root),
    };
    Ok(Workspace {
        root,
        data_dir,
        config,
    })
}

pub fn resolve(data_override: Option<&Path>) -> Result<Workspace> {
    let cwd = std::env::current_dir()?;
    resolve_from(&cwd, data_override)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        fs::create_dir_all(dir.join("data")).unwrap();
        fs::write(dir.join("data/index.json"), "[]").unwrap();
    }

    #[test]
    fn find_root_from_direct() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        assert_eq!(find_root_from(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn find_root_from_subdir() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        fs::create_dir_all(dir.path().join("notes/deep")).unwrap();
        let root = find_root_from(&dir.path().join("notes/deep")).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_fails_without_data() {
        let dir = TempDir::new().unwrap();
        assert!(find_root_from(dir.path()).is_err());
    }

    #[test]
    fn config_data_dir_is_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("qdeck.conf"), "data_dir: questions\n").unwrap();
        let ws = resolve_from(dir.path(), None).unwrap();
        assert_eq!(ws.data_dir, dir.path().join("questions"));
        assert_eq!(ws.index_path(), dir.path().join("questions/index.json"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let other = TempDir::new().unwrap();
        let ws = resolve_from(dir.path(), Some(other.path())).unwrap();
        assert_eq!(ws.data_dir, other.path());
        assert_eq!(ws.root, dir.path());
    }
}
