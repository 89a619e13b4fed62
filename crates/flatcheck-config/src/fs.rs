// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` (uses the platform config dir by default).

use crate::config::{ConfigError, ConfigStore};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/flatcheck`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "flatcheck")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self::at(proj.config_dir()))
    }

    /// Create a store rooted at `dir`. The directory is created by the first
    /// save, so read-only use never touches the filesystem.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            base: dir.as_ref().to_path_buf(),
        }
    }

    /// File holding the blob for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let path = self.path_for(key);
        debug!(path = %path.display(), "loading config");
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), bytes = data.len(), "saving config");
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ConfigService;
    use crate::runner::{RunnerConfig, RUNNER_CONFIG_KEY};

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path());
        assert!(matches!(store.load_raw("runner"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn reading_never_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested/flatcheck");
        let service = ConfigService::new(FsConfigStore::at(&base));
        assert_eq!(service.runner().unwrap(), RunnerConfig::default());
        assert!(!base.exists());
    }

    #[test]
    fn first_save_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(FsConfigStore::at(dir.path().join("nested")));
        let cfg = RunnerConfig {
            log_level: "debug".into(),
            fail_fast: true,
            default_state: Some("state.json".into()),
        };
        service.save_runner(&cfg).unwrap();
        assert!(dir.path().join("nested").join(format!("{RUNNER_CONFIG_KEY}.json")).exists());
        assert_eq!(service.runner().unwrap(), cfg);
    }
}
