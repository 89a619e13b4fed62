// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Nested-attribute matching of set and list elements.

use crate::error::{CheckError, Constraints, Expectation};
use crate::flatmap::FlatMap;
use crate::path::{key_segments, split_at_depth, PathPattern};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Succeed when some element under `pattern` satisfies every non-empty entry
/// of `constraints` at once.
///
/// `pattern` must end with the wildcard. Each constraint key is the suffix of
/// a flattened key below the element index, so `disk.*` with
/// `{"name": "root", "opts.mode": "rw"}` looks for one `disk.<id>` carrying
/// both `disk.<id>.name = root` and `disk.<id>.opts.mode = rw`. Element ids are
/// taken verbatim from the keys and may be synthetic set hashes.
///
/// Empty-valued constraints are accepted but never counted: an unset
/// attribute and one set to `""` are indistinguishable in flattened state. At
/// least one constraint must be non-empty or the check fails with
/// [`CheckError::EmptyConstraintSet`] before scanning.
///
/// The result is existence only; when several elements qualify, whichever is
/// confirmed first ends the scan.
pub fn match_element(
    state: &FlatMap,
    pattern: &PathPattern,
    constraints: &Constraints,
) -> Result<(), CheckError> {
    pattern.require_trailing_wildcard()?;

    let required_hits = constraints.values().filter(|v| !v.is_empty()).count();
    if required_hits == 0 {
        return Err(CheckError::EmptyConstraintSet {
            constraints: constraints.clone(),
        });
    }

    let depth = pattern.len();
    let mut tally: HashMap<&str, usize> = HashMap::new();

    for (key, value) in state.iter() {
        let segments = key_segments(key);
        // an element attribute sits at least one segment below the index
        if segments.len() <= depth || !pattern.matches_prefix(&segments) {
            continue;
        }
        let Some((element, suffix)) = split_at_depth(key, depth) else {
            continue;
        };
        let satisfied = constraints
            .get(suffix)
            .is_some_and(|expected| !expected.is_empty() && expected == value);
        if !satisfied {
            continue;
        }

        let hits = tally.entry(element).or_insert(0);
        *hits += 1;
        trace!(element, suffix, hits = *hits, required_hits, "constraint satisfied");
        if *hits == required_hits {
            debug!(path = %pattern, element, "element matched");
            return Ok(());
        }
    }

    debug!(path = %pattern, candidates = tally.len(), "no element matched");
    Err(CheckError::NoMatchingElement {
        path: pattern.as_str().to_owned(),
        expected: Expectation::Nested(constraints.clone()),
        state: state.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn constraints(pairs: &[(&str, &str)]) -> Constraints {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn hosts() -> FlatMap {
        [
            ("hosts.#", "2"),
            ("hosts.0.name", "a"),
            ("hosts.0.zone", "x"),
            ("hosts.1.name", "b"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn finds_element_satisfying_single_constraint() {
        let p = PathPattern::parse("hosts.*");
        assert!(match_element(&hosts(), &p, &constraints(&[("name", "b")])).is_ok());
    }

    #[test]
    fn constraints_must_hold_on_the_same_element() {
        let p = PathPattern::parse("hosts.*");
        // name=b lives on element 1, zone=x on element 0
        let err = match_element(&hosts(), &p, &constraints(&[("name", "b"), ("zone", "x")]))
            .unwrap_err();
        assert!(matches!(err, CheckError::NoMatchingElement { .. }));
        assert!(match_element(&hosts(), &p, &constraints(&[("name", "a"), ("zone", "x")])).is_ok());
    }

    #[test]
    fn all_empty_constraints_are_rejected_before_scanning() {
        let p = PathPattern::parse("hosts.*");
        let c = constraints(&[("name", ""), ("zone", "")]);
        assert_eq!(
            match_element(&FlatMap::new(), &p, &c).unwrap_err(),
            CheckError::EmptyConstraintSet { constraints: c.clone() }
        );
        assert!(matches!(
            match_element(&hosts(), &p, &c),
            Err(CheckError::EmptyConstraintSet { .. })
        ));
    }

    #[test]
    fn empty_constraints_do_not_count_toward_a_match() {
        let state: FlatMap = [
            ("hosts.0.name", "a"),
            ("hosts.0.zone", ""),
            ("hosts.1.name", "b"),
        ]
        .into_iter()
        .collect();
        let p = PathPattern::parse("hosts.*");
        // element 0 has an empty zone but the wrong name
        assert!(match_element(&state, &p, &constraints(&[("name", "c"), ("zone", "")])).is_err());
        // element 1 has no zone at all and still matches
        assert!(match_element(&state, &p, &constraints(&[("name", "b"), ("zone", "")])).is_ok());
    }

    #[test]
    fn synthetic_set_ids_are_element_identifiers() {
        let state: FlatMap = [
            ("disk.#", "2"),
            ("disk.3421.name", "root"),
            ("disk.3421.size", "10"),
            ("disk.9922.name", "data"),
            ("disk.9922.size", "20"),
        ]
        .into_iter()
        .collect();
        let p = PathPattern::parse("disk.*");
        assert!(match_element(&state, &p, &constraints(&[("name", "data"), ("size", "20")])).is_ok());
        assert!(match_element(&state, &p, &constraints(&[("name", "data"), ("size", "10")])).is_err());
    }

    #[test]
    fn suffix_may_span_several_segments() {
        let state: FlatMap = [
            ("network.0.device", "eth0"),
            ("network.0.opts.mtu", "9000"),
            ("network.1.device", "eth1"),
            ("network.1.opts.mtu", "1500"),
        ]
        .into_iter()
        .collect();
        let p = PathPattern::parse("network.*");
        let c = constraints(&[("device", "eth1"), ("opts.mtu", "1500")]);
        assert!(match_element(&state, &p, &c).is_ok());
    }

    #[test]
    fn wildcard_index_may_be_a_marker_token() {
        let state: FlatMap = [("vms.#.x", "1")].into_iter().collect();
        let p = PathPattern::parse("vms.*");
        assert!(match_element(&state, &p, &constraints(&[("x", "1")])).is_ok());
    }

    #[test]
    fn earlier_wildcards_qualify_the_element() {
        let state: FlatMap = [
            ("vms.0.disk.0.name", "root"),
            ("vms.1.disk.0.size", "10"),
        ]
        .into_iter()
        .collect();
        let p = PathPattern::parse("vms.*.disk.*");
        // same disk index, different vms: not one element
        let c = constraints(&[("name", "root"), ("size", "10")]);
        assert!(match_element(&state, &p, &c).is_err());
    }

    #[test]
    fn scalar_elements_are_too_shallow() {
        let state: FlatMap = [("tags.0", "name")].into_iter().collect();
        let p = PathPattern::parse("tags.*");
        assert!(match_element(&state, &p, &constraints(&[("name", "x")])).is_err());
    }

    #[test]
    fn requires_trailing_wildcard() {
        let p = PathPattern::parse("hosts.*.name");
        assert!(matches!(
            match_element(&hosts(), &p, &constraints(&[("name", "a")])),
            Err(CheckError::MalformedPath { .. })
        ));
    }

    #[test]
    fn failure_carries_full_state_dump() {
        let p = PathPattern::parse("hosts.*");
        let c = constraints(&[("name", "z")]);
        let err = match_element(&hosts(), &p, &c).unwrap_err();
        assert_eq!(
            err,
            CheckError::NoMatchingElement {
                path: "hosts.*".into(),
                expected: Expectation::Nested(c),
                state: hosts(),
            }
        );
    }
}
