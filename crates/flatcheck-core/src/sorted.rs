// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ordering checks over numerically indexed lists.

use crate::error::{CheckError, Expectation};
use crate::flatmap::{FlatMap, COUNT_MARKER, MAP_SIZE_MARKER};
use crate::path::{key_segments, PathPattern};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Requested list direction. Parses from `asc` / `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Each value strictly less than its successor.
    #[serde(rename = "asc")]
    Ascending,
    /// Each value strictly greater than its successor.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Token used in paths, check files and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Whether every adjacent pair of `values` is strictly ordered.
    ///
    /// Equal neighbours fail in both directions.
    pub fn is_sorted<S: AsRef<str>>(self, values: &[S]) -> bool {
        values.windows(2).all(|pair| {
            let (a, b) = (pair[0].as_ref(), pair[1].as_ref());
            match self {
                Self::Ascending => a < b,
                Self::Descending => a > b,
            }
        })
    }
}

impl FromStr for SortOrder {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(CheckError::UnknownSortOrder(other.to_owned())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Succeed when the list addressed by `pattern` is strictly ordered per
/// `order`.
///
/// The last wildcard in `pattern` marks the list index (`hosts.*.name_label`).
/// Keys of exactly the pattern's depth whose other segments match contribute
/// their value at the numeric index found under the wildcard; count marker
/// keys (`hosts.#`) carry no index and are skipped. Values are
/// compacted in index order before comparison, so gaps in the index range
/// close up. Comparison is by string ordering.
///
/// # Errors
///
/// - [`CheckError::MalformedPath`] when `pattern` has no wildcard.
/// - [`CheckError::InvalidListIndex`] for a non-numeric index token.
/// - [`CheckError::DuplicateListIndex`] when two keys parse to one index.
/// - [`CheckError::NoMatchingElement`] when no key matches.
/// - [`CheckError::NotSorted`] when the ordering check fails.
pub fn verify_sorted(state: &FlatMap, pattern: &PathPattern, order: SortOrder) -> Result<(), CheckError> {
    let index_pos = pattern.require_wildcard()?;
    let values = extract_indexed(state, pattern, index_pos)?;
    debug!(path = %pattern, %order, ?values, "extracted list");

    if values.is_empty() {
        return Err(CheckError::NoMatchingElement {
            path: pattern.as_str().to_owned(),
            expected: Expectation::IndexedEntries,
            state: state.clone(),
        });
    }
    if order.is_sorted(&values) {
        return Ok(());
    }
    Err(CheckError::NotSorted {
        values: values.into_iter().map(str::to_owned).collect(),
        order,
    })
}

fn extract_indexed<'a>(
    state: &'a FlatMap,
    pattern: &PathPattern,
    index_pos: usize,
) -> Result<Vec<&'a str>, CheckError> {
    let mut by_index: BTreeMap<usize, (&'a str, &'a str)> = BTreeMap::new();

    for (key, value) in state.iter() {
        let segments = key_segments(key);
        if !pattern.matches_exact(&segments) {
            continue;
        }
        let token = segments[index_pos];
        if token == COUNT_MARKER || token == MAP_SIZE_MARKER {
            continue;
        }
        let index: usize = token.parse().map_err(|_| CheckError::InvalidListIndex {
            path: pattern.as_str().to_owned(),
            key: key.to_owned(),
            token: token.to_owned(),
        })?;
        match by_index.entry(index) {
            Entry::Vacant(slot) => {
                slot.insert((key, value));
            }
            Entry::Occupied(slot) => {
                return Err(CheckError::DuplicateListIndex {
                    path: pattern.as_str().to_owned(),
                    index,
                    first: slot.get().0.to_owned(),
                    second: key.to_owned(),
                });
            }
        }
    }

    Ok(by_index.into_values().map(|(_, value)| value).collect())
}
