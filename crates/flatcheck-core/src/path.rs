// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dotted attribute paths with wildcard index segments.

use crate::error::{CheckError, PathRequirement};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Segment token standing for "any collection index".
pub const WILDCARD: &str = "*";

/// Separator between path segments and between flattened key segments.
pub const SEPARATOR: char = '.';

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Must equal the key segment at the same position.
    Literal(String),
    /// Matches any token.
    Wildcard,
}

impl PathSegment {
    /// Whether this segment accepts the flattened key token `token`.
    ///
    /// A wildcard accepts every token, count markers included.
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Literal(lit) => lit == token,
            Self::Wildcard => true,
        }
    }

    /// True for [`PathSegment::Wildcard`].
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// A parsed attribute path such as `hosts.*.name_label`.
///
/// Parsing never fails; the structural requirements of each check are
/// enforced by [`require_trailing_wildcard`](Self::require_trailing_wildcard)
/// and [`require_wildcard`](Self::require_wildcard). Segments are split on
/// [`SEPARATOR`] with no escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Split `path` into literal and wildcard segments.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split(SEPARATOR)
            .map(|seg| {
                if seg == WILDCARD {
                    PathSegment::Wildcard
                } else {
                    PathSegment::Literal(seg.to_owned())
                }
            })
            .collect();
        Self {
            raw: path.to_owned(),
            segments,
        }
    }

    /// The path exactly as given to [`parse`](Self::parse).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept alongside [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Position of the last wildcard segment.
    pub fn last_wildcard(&self) -> Option<usize> {
        self.segments.iter().rposition(PathSegment::is_wildcard)
    }

    /// Fail with [`CheckError::MalformedPath`] unless the final segment is a
    /// wildcard (element and scalar-set matching).
    pub fn require_trailing_wildcard(&self) -> Result<(), CheckError> {
        if self.segments.last().is_some_and(PathSegment::is_wildcard) {
            Ok(())
        } else {
            Err(self.malformed(PathRequirement::TrailingWildcard))
        }
    }

    /// Position of the list index wildcard, failing with
    /// [`CheckError::MalformedPath`] when the path has none (sorted-list
    /// verification).
    pub fn require_wildcard(&self) -> Result<usize, CheckError> {
        self.last_wildcard()
            .ok_or_else(|| self.malformed(PathRequirement::AnyWildcard))
    }

    /// Whether the leading segments of `key_segments` satisfy every pattern
    /// segment. Keys shallower than the pattern never match.
    pub fn matches_prefix(&self, key_segments: &[&str]) -> bool {
        key_segments.len() >= self.segments.len()
            && self
                .segments
                .iter()
                .zip(key_segments)
                .all(|(seg, token)| seg.matches(token))
    }

    /// Whether `key_segments` has exactly the pattern's depth and matches it.
    pub fn matches_exact(&self, key_segments: &[&str]) -> bool {
        key_segments.len() == self.segments.len() && self.matches_prefix(key_segments)
    }

    fn malformed(&self, requirement: PathRequirement) -> CheckError {
        CheckError::MalformedPath {
            path: self.raw.clone(),
            requirement,
        }
    }
}

/// Split a flattened key into its segments.
pub(crate) fn key_segments(key: &str) -> Vec<&str> {
    key.split(SEPARATOR).collect()
}

/// Split `key` after its first `depth` segments into `(element, suffix)`.
///
/// `hosts.1.name` at depth 2 yields `("hosts.1", "name")`. Returns `None` when
/// the key has no segments past `depth`.
pub(crate) fn split_at_depth(key: &str, depth: usize) -> Option<(&str, &str)> {
    let cut = key.match_indices(SEPARATOR).nth(depth.checked_sub(1)?)?.0;
    Some((&key[..cut], &key[cut + 1..]))
}

impl FromStr for PathPattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_wildcards_from_literals() {
        let p = PathPattern::parse("hosts.*.name_label");
        assert_eq!(
            p.segments(),
            &[
                PathSegment::Literal("hosts".into()),
                PathSegment::Wildcard,
                PathSegment::Literal("name_label".into()),
            ]
        );
        assert_eq!(p.last_wildcard(), Some(1));
        assert_eq!(p.to_string(), "hosts.*.name_label");
    }

    #[test]
    fn partial_star_is_literal() {
        let p = PathPattern::parse("tags.*x");
        assert_eq!(p.last_wildcard(), None);
    }

    #[test]
    fn trailing_wildcard_requirement() {
        assert!(PathPattern::parse("tags.*").require_trailing_wildcard().is_ok());
        let err = PathPattern::parse("hosts.*.name")
            .require_trailing_wildcard()
            .unwrap_err();
        assert!(matches!(
            err,
            CheckError::MalformedPath {
                requirement: PathRequirement::TrailingWildcard,
                ..
            }
        ));
    }

    #[test]
    fn any_wildcard_requirement_picks_last_wildcard() {
        assert_eq!(PathPattern::parse("a.*.b.*.c").require_wildcard().unwrap(), 3);
        let err = PathPattern::parse("hosts.0.name").require_wildcard().unwrap_err();
        assert_eq!(
            err,
            CheckError::MalformedPath {
                path: "hosts.0.name".into(),
                requirement: PathRequirement::AnyWildcard,
            }
        );
    }

    #[test]
    fn wildcard_accepts_any_token() {
        let p = PathPattern::parse("tags.*");
        assert!(p.matches_exact(&["tags", "0"]));
        assert!(p.matches_exact(&["tags", "8675309"]));
        assert!(p.matches_exact(&["tags", "#"]));
        assert!(p.matches_exact(&["tags", "%"]));
        assert!(!p.matches_exact(&["labels", "0"]));
    }

    #[test]
    fn prefix_versus_exact_depth() {
        let p = PathPattern::parse("list.*");
        assert!(p.matches_prefix(&["list", "0", "nested"]));
        assert!(!p.matches_exact(&["list", "0", "nested"]));
        assert!(!p.matches_prefix(&["list"]));
        assert!(!p.matches_prefix(&["other", "0"]));
    }

    #[test]
    fn split_at_depth_separates_element_and_suffix() {
        assert_eq!(split_at_depth("hosts.1.name", 2), Some(("hosts.1", "name")));
        assert_eq!(
            split_at_depth("disk.0.opts.mode", 2),
            Some(("disk.0", "opts.mode"))
        );
        assert_eq!(split_at_depth("hosts.1", 2), None);
        assert_eq!(split_at_depth("hosts", 0), None);
    }
}
