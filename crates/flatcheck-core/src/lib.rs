// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Assertions over flattened resource state.
//!
//! Infrastructure tooling serializes a resource's post-apply state into a flat
//! map of dotted keys (`hosts.0.name_label`, `tags.#`, `disk.3421.size`) to
//! string values. `flatcheck-core` answers three questions against such a map:
//!
//! - does a set/list contain an element whose nested attributes match a group
//!   of constraints ([`match_element`]);
//! - does a set/list contain a scalar, given literally ([`match_scalar`]) or
//!   read from another instance ([`match_across_states`]);
//! - is an indexed list sorted ([`verify_sorted`]).
//!
//! Paths address collection positions through the wildcard segment
//! [`WILDCARD`]. Every operation is a pure read over an immutable [`FlatMap`];
//! instances are resolved by name through a [`StateSource`].
//!
//! # Index tokens
//!
//! Element and scalar matching accept any index token, including the
//! synthetic hash-like identifiers sets use. Only sorted-list verification
//! requires numeric indices. The count markers `#` and `%` are never treated
//! as element indices.
#![forbid(unsafe_code)]

mod check;
mod element;
mod error;
mod flatmap;
mod path;
mod registry;
mod scalar;
mod sorted;

pub use check::{
    check_list_attr_sorted, check_set_elem_attr, check_set_elem_attr_pair,
    check_set_elem_nested_attrs, Check, CheckOutcome, CheckSuite, SuiteReport,
};
pub use element::match_element;
pub use error::{CheckError, Constraints, Expectation, PathRequirement};
pub use flatmap::{FlatMap, COUNT_MARKER, MAP_SIZE_MARKER};
pub use path::{PathPattern, PathSegment, SEPARATOR, WILDCARD};
pub use registry::{ModuleState, ResourceState, StateSource, ROOT_MODULE};
pub use scalar::{match_across_states, match_scalar};
pub use sorted::{verify_sorted, SortOrder};
