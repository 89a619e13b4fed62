// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings storage port and the JSON service over it.

use crate::runner::{RunnerConfig, RUNNER_CONFIG_KEY};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Where settings blobs live, keyed by logical name (`runner`).
pub trait ConfigStore {
    /// Raw blob for `key`; [`ConfigError::NotFound`] when nothing was saved.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace the blob for `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failures reading, writing or editing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing saved under the key.
    #[error("not found")]
    NotFound,
    /// Store I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A saved blob is not valid JSON for its type.
    #[error("config {key:?} is corrupt: {source}")]
    Parse {
        /// Key whose blob failed to decode.
        key: String,
        /// Decoder error.
        source: serde_json::Error,
    },
    /// A value could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    /// A field name the settings type does not have.
    #[error("unknown config field {0:?}")]
    UnknownField(String),
    /// A field value that does not parse for its field.
    #[error("invalid value {value:?} for {field}: expected {expected}")]
    InvalidValue {
        /// Field being set.
        field: String,
        /// Rejected text.
        value: String,
        /// What the field accepts.
        expected: &'static str,
    },
    /// Anything else the store reports.
    #[error("other: {0}")]
    Other(String),
}

/// Typed JSON settings over a [`ConfigStore`].
///
/// Missing and empty blobs both read as "never saved".
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Decode the value saved under `key`, `Ok(None)` when never saved.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) | Err(ConfigError::NotFound) => {
                debug!(key, "no saved config");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                key: key.to_owned(),
                source,
            })
    }

    /// [`load`](Self::load), with `T::default()` for a value never saved.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ConfigError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Encode `value` as pretty JSON under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Runner settings, defaults when never saved.
    pub fn runner(&self) -> Result<RunnerConfig, ConfigError> {
        self.load_or_default(RUNNER_CONFIG_KEY)
    }

    /// Persist runner settings.
    pub fn save_runner(&self, cfg: &RunnerConfig) -> Result<(), ConfigError> {
        self.save(RUNNER_CONFIG_KEY, cfg)
    }
}
