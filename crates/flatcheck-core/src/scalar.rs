// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar membership in sets and lists, literal or cross-referenced.

use crate::error::{CheckError, Expectation};
use crate::flatmap::FlatMap;
use crate::path::{key_segments, PathPattern};
use tracing::debug;

/// Succeed when some scalar element addressed by `pattern` equals `expected`.
///
/// `pattern` must end with the wildcard and candidate keys must have exactly
/// the pattern's depth: `list.*` matches `list.0` but never `list.0.nested`.
pub fn match_scalar(state: &FlatMap, pattern: &PathPattern, expected: &str) -> Result<(), CheckError> {
    pattern.require_trailing_wildcard()?;

    let hit = state
        .iter()
        .filter(|(_, value)| *value == expected)
        .find(|(key, _)| pattern.matches_exact(&key_segments(key)));

    if let Some((key, _)) = hit {
        debug!(path = %pattern, key, "scalar element matched");
        return Ok(());
    }
    Err(CheckError::NoMatchingElement {
        path: pattern.as_str().to_owned(),
        expected: Expectation::Value(expected.to_owned()),
        state: state.clone(),
    })
}

/// Succeed when some scalar element addressed by `pattern` in `state` equals
/// the literal attribute `other_key` of the instance `other_name`.
///
/// Fails with [`CheckError::AttributeNotSet`] when `other_state` lacks the
/// key; otherwise the result is exactly that of [`match_scalar`] with the
/// referenced value.
pub fn match_across_states(
    state: &FlatMap,
    pattern: &PathPattern,
    other_name: &str,
    other_state: &FlatMap,
    other_key: &str,
) -> Result<(), CheckError> {
    let expected = other_state
        .get(other_key)
        .ok_or_else(|| CheckError::AttributeNotSet {
            instance: other_name.to_owned(),
            key: other_key.to_owned(),
        })?;
    debug!(other_name, other_key, expected, "resolved cross-reference");
    match_scalar(state, pattern, expected)
}
