// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Configuration for flatcheck tools.
//! Keeps the runner thin: a storage port, a JSON service over it, and the
//! filesystem store used by the CLI.

pub mod config;
pub mod fs;
pub mod runner;

pub use config::{ConfigError, ConfigService, ConfigStore};
pub use fs::FsConfigStore;
pub use runner::{RunnerConfig, RUNNER_CONFIG_KEY};
