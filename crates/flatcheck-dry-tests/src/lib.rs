// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for flatcheck crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`state`] - Builders for flattened state and module state
//! - [`fixtures`] - Canned provider states used across test suites

pub mod config;
pub mod fixtures;
pub mod state;

pub use config::InMemoryConfigStore;
pub use fixtures::{hosts_data_source, vm_with_disks, HOSTS_DATA_SOURCE, VM_RESOURCE};
pub use state::{FlatMapBuilder, ModuleStateBuilder};
