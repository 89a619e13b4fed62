// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved settings for the check runner.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Store key the runner settings live under.
pub const RUNNER_CONFIG_KEY: &str = "runner";

/// Settings the `flatcheck` runner reads before parsing its flags.
///
/// Flags override every field. Missing fields take their defaults, so an
/// older file keeps loading after fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Stop a suite at the first failing check.
    pub fail_fast: bool,
    /// State document used when `--state` is not given.
    pub default_state: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            fail_fast: false,
            default_state: None,
        }
    }
}

impl RunnerConfig {
    /// Field names accepted by [`set`](Self::set).
    pub const FIELDS: [&'static str; 3] = ["log_level", "fail_fast", "default_state"];

    /// Set one field from its text form. An empty `default_state` clears it.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ConfigError> {
        match field {
            "log_level" => value.clone_into(&mut self.log_level),
            "fail_fast" => {
                self.fail_fast = value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: field.to_owned(),
                    value: value.to_owned(),
                    expected: "true or false",
                })?;
            }
            "default_state" => {
                self.default_state = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            other => return Err(ConfigError::UnknownField(other.to_owned())),
        }
        Ok(())
    }
}
