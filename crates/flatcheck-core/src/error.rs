// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Check failures.

use crate::flatmap::FlatMap;
use crate::path::WILDCARD;
use crate::sorted::SortOrder;
use std::collections::BTreeMap;
use std::fmt;

/// Expected nested attributes of one element, keyed by the key suffix below
/// the element index (`name`, `opts.mode`).
pub type Constraints = BTreeMap<String, String>;

/// Structural requirement a path failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRequirement {
    /// The final segment must be the wildcard.
    TrailingWildcard,
    /// Some segment must be the wildcard.
    AnyWildcard,
}

impl fmt::Display for PathRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrailingWildcard => write!(f, "does not end with the special value {WILDCARD:?}"),
            Self::AnyWildcard => write!(f, "does not contain the special value {WILDCARD:?}"),
        }
    }
}

/// What a failed scan was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// A scalar element equal to this value.
    Value(String),
    /// An element whose nested attributes satisfy these constraints.
    Nested(Constraints),
    /// Any numerically indexed entry.
    IndexedEntries,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "value {v:?}"),
            Self::Nested(c) => write!(f, "nested attrs {c:?}"),
            Self::IndexedEntries => f.write_str("any indexed entry"),
        }
    }
}

/// Errors produced by a single check. Exactly one is reported per failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The path does not have the shape the check needs.
    #[error("[MALFORMED_PATH] {path:?} {requirement}")]
    MalformedPath {
        /// Path as supplied.
        path: String,
        /// Which requirement failed.
        requirement: PathRequirement,
    },
    /// Every constraint value was empty, so no element could be told apart
    /// from an absent one.
    #[error("[EMPTY_CONSTRAINT_SET] {constraints:?} has no non-empty values")]
    EmptyConstraintSet {
        /// Constraints as supplied.
        constraints: Constraints,
    },
    /// The literal attribute supplying an expected value is unset.
    #[error("[ATTRIBUTE_NOT_SET] {instance}: attribute {key:?} not set, cannot be checked against a set element")]
    AttributeNotSet {
        /// Instance that was expected to carry the attribute.
        instance: String,
        /// Flattened key that was looked up.
        key: String,
    },
    /// The full scan found no qualifying element.
    #[error("[NO_MATCHING_ELEMENT] no element {path:?} with {expected} in state: {state}")]
    NoMatchingElement {
        /// Path that was scanned.
        path: String,
        /// What the scan looked for.
        expected: Expectation,
        /// Complete state that was scanned.
        state: FlatMap,
    },
    /// The extracted list is not strictly ordered.
    #[error("[NOT_SORTED] expected {values:?} to be sorted {order}")]
    NotSorted {
        /// Values in index order.
        values: Vec<String>,
        /// Requested direction.
        order: SortOrder,
    },
    /// A list key carries a non-numeric token at the index position.
    #[error("[INVALID_LIST_INDEX] {path:?}: key {key:?} has non-numeric index {token:?}")]
    InvalidListIndex {
        /// Path that was scanned.
        path: String,
        /// Offending flattened key.
        key: String,
        /// Token found at the wildcard position.
        token: String,
    },
    /// Two keys resolve to the same numeric list index.
    #[error("[DUPLICATE_LIST_INDEX] {path:?}: index {index} addressed by both {first:?} and {second:?}")]
    DuplicateListIndex {
        /// Path that was scanned.
        path: String,
        /// Numeric index both keys parse to.
        index: usize,
        /// Key seen first.
        first: String,
        /// Key seen second.
        second: String,
    },
    /// A sort direction token other than `asc` or `desc`.
    #[error("[UNKNOWN_SORT_ORDER] {0:?} (expected \"asc\" or \"desc\")")]
    UnknownSortOrder(String),
    /// No resource with this name exists in the module.
    #[error("[INSTANCE_NOT_FOUND] not found: {name} in {module}")]
    InstanceNotFound {
        /// Requested resource name.
        name: String,
        /// Module path that was searched.
        module: String,
    },
    /// The resource exists but has no primary instance.
    #[error("[NO_PRIMARY_INSTANCE] no primary instance: {name} in {module}")]
    NoPrimaryInstance {
        /// Requested resource name.
        name: String,
        /// Module path that was searched.
        module: String,
    },
}
