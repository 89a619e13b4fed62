// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for the flatcheck runner.

use anyhow::Result;
use flatcheck_cli::entrypoint;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    entrypoint()
}
