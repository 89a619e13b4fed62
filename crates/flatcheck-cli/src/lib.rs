// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! flatcheck runner.
//!
//! Loads a state document, runs a suite of checks from a JSON file against it
//! and reports per-check results. Exits non-zero when any check fails.
//!
//! # Usage
//! ```text
//! flatcheck run --state state.json --checks checks.json [--fail-fast] [--format json]
//! flatcheck inspect --state state.json xenorchestra_vm.vm --prefix disk.
//! flatcheck config show
//! flatcheck config set fail_fast true
//! ```
// The runner is expected to print to stdout.
#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod cli;
pub mod logging;
pub mod report;
pub mod suite;

pub use cli::entrypoint;
