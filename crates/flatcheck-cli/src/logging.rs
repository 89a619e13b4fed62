// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subscriber setup. Logs go to stderr so stdout carries only reports.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber from `RUST_LOG` alone.
///
/// Returns false, installing nothing, when `RUST_LOG` is unset or does not
/// parse; the caller then falls back to [`init`] once settings are loaded.
pub fn init_from_env() -> bool {
    EnvFilter::try_from_default_env().is_ok_and(install)
}

/// Install the global subscriber with `fallback` as the filter.
///
/// `RUST_LOG` still wins when it parses; an unparsable `fallback` degrades to
/// `warn`. Calling this after a subscriber is installed does nothing.
pub fn init(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    install(filter);
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
