// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named checks against a [`StateSource`], and declarative suites of them.

use crate::element::match_element;
use crate::error::{CheckError, Constraints};
use crate::path::PathPattern;
use crate::registry::StateSource;
use crate::scalar::{match_across_states, match_scalar};
use crate::sorted::{verify_sorted, SortOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Set/list element of `name` under `attr` (ending in `*`) has all of
/// `values` as nested attributes.
pub fn check_set_elem_nested_attrs<S: StateSource + ?Sized>(
    source: &S,
    name: &str,
    attr: &str,
    values: &Constraints,
) -> Result<(), CheckError> {
    let state = source.instance(name)?;
    match_element(state, &PathPattern::parse(attr), values)
}

/// Set/list of `name` under `attr` (ending in `*`) contains `value`.
pub fn check_set_elem_attr<S: StateSource + ?Sized>(
    source: &S,
    name: &str,
    attr: &str,
    value: &str,
) -> Result<(), CheckError> {
    let state = source.instance(name)?;
    match_scalar(state, &PathPattern::parse(attr), value)
}

/// Set/list of `name` under `attr` contains the value of the literal
/// attribute `other_key` of `other_name`.
///
/// Both instances are resolved before any matching, so a missing instance is
/// reported ahead of a missing attribute.
pub fn check_set_elem_attr_pair<S: StateSource + ?Sized>(
    source: &S,
    name: &str,
    attr: &str,
    other_name: &str,
    other_key: &str,
) -> Result<(), CheckError> {
    let state = source.instance(name)?;
    let other_state = source.instance(other_name)?;
    match_across_states(state, &PathPattern::parse(attr), other_name, other_state, other_key)
}

/// List of `name` addressed by `attr` is strictly sorted per `order`.
pub fn check_list_attr_sorted<S: StateSource + ?Sized>(
    source: &S,
    name: &str,
    attr: &str,
    order: SortOrder,
) -> Result<(), CheckError> {
    let state = source.instance(name)?;
    verify_sorted(state, &PathPattern::parse(attr), order)
}

/// A check described as data, as read from a checks file.
///
/// Serialized with a `kind` tag:
///
/// ```json
/// { "kind": "set_elem_attr", "name": "xenorchestra_vm.vm", "attr": "tags.*", "value": "prod" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// See [`check_set_elem_nested_attrs`].
    SetElemNestedAttrs {
        /// Resource name.
        name: String,
        /// Path ending in the wildcard.
        attr: String,
        /// Nested attribute constraints.
        values: Constraints,
    },
    /// See [`check_set_elem_attr`].
    SetElemAttr {
        /// Resource name.
        name: String,
        /// Path ending in the wildcard.
        attr: String,
        /// Expected scalar.
        value: String,
    },
    /// See [`check_set_elem_attr_pair`].
    SetElemAttrPair {
        /// Resource holding the set.
        name: String,
        /// Path ending in the wildcard.
        attr: String,
        /// Resource holding the expected value.
        other_name: String,
        /// Literal key of the expected value.
        other_key: String,
    },
    /// See [`check_list_attr_sorted`].
    ListAttrSorted {
        /// Resource name.
        name: String,
        /// Path with a wildcard at the list index.
        attr: String,
        /// Requested direction.
        order: SortOrder,
    },
}

impl Check {
    /// Run this check against `source`.
    pub fn run<S: StateSource + ?Sized>(&self, source: &S) -> Result<(), CheckError> {
        match self {
            Self::SetElemNestedAttrs { name, attr, values } => {
                check_set_elem_nested_attrs(source, name, attr, values)
            }
            Self::SetElemAttr { name, attr, value } => check_set_elem_attr(source, name, attr, value),
            Self::SetElemAttrPair {
                name,
                attr,
                other_name,
                other_key,
            } => check_set_elem_attr_pair(source, name, attr, other_name, other_key),
            Self::ListAttrSorted { name, attr, order } => {
                check_list_attr_sorted(source, name, attr, *order)
            }
        }
    }

    /// Primary resource the check reads.
    pub fn name(&self) -> &str {
        match self {
            Self::SetElemNestedAttrs { name, .. }
            | Self::SetElemAttr { name, .. }
            | Self::SetElemAttrPair { name, .. }
            | Self::ListAttrSorted { name, .. } => name,
        }
    }
}

/// Short one-line label, e.g. `set_elem_attr xenorchestra_vm.vm tags.* = "prod"`.
impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetElemNestedAttrs { name, attr, values } => {
                write!(f, "set_elem_nested_attrs {name} {attr} {values:?}")
            }
            Self::SetElemAttr { name, attr, value } => {
                write!(f, "set_elem_attr {name} {attr} = {value:?}")
            }
            Self::SetElemAttrPair {
                name,
                attr,
                other_name,
                other_key,
            } => write!(f, "set_elem_attr_pair {name} {attr} = {other_name} {other_key}"),
            Self::ListAttrSorted { name, attr, order } => {
                write!(f, "list_attr_sorted {name} {attr} {order}")
            }
        }
    }
}

/// Result of one check inside a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The check that ran.
    pub check: Check,
    /// Its result.
    pub result: Result<(), CheckError>,
}

impl CheckOutcome {
    /// True when the check passed.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered list of checks run together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuite {
    /// Checks in run order.
    pub checks: Vec<Check>,
}

impl CheckSuite {
    /// Suite over `checks`.
    pub fn new(checks: Vec<Check>) -> Self {
        Self { checks }
    }

    /// Run every check in order. With `fail_fast` the run stops after the
    /// first failure and the remaining checks are counted as skipped.
    pub fn run<S: StateSource + ?Sized>(&self, source: &S, fail_fast: bool) -> SuiteReport {
        let mut outcomes = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let result = check.run(source);
            match &result {
                Ok(()) => info!(check = %check, "check passed"),
                Err(err) => warn!(check = %check, %err, "check failed"),
            }
            let failed = result.is_err();
            outcomes.push(CheckOutcome {
                check: check.clone(),
                result,
            });
            if failed && fail_fast {
                break;
            }
        }
        let skipped = self.checks.len() - outcomes.len();
        SuiteReport { outcomes, skipped }
    }
}

/// Per-check results of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    /// Outcomes of the checks that ran, in order.
    pub outcomes: Vec<CheckOutcome>,
    /// Checks not run because of fail-fast.
    pub skipped: usize,
}

impl SuiteReport {
    /// Number of passing checks.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failing checks.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True when every check ran and passed.
    pub fn is_success(&self) -> bool {
        self.skipped == 0 && self.failed() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::flatmap::FlatMap;
    use crate::registry::{ModuleState, ResourceState};

    fn module() -> ModuleState {
        let vm: FlatMap = [("tags.#", "2"), ("tags.0", "dev"), ("tags.1", "prod")]
            .into_iter()
            .collect();
        let data: FlatMap = [("names.0", "prod")].into_iter().collect();
        ModuleState::default()
            .with_resource("vm", ResourceState::with_primary(vm))
            .with_resource("data.names", ResourceState::with_primary(data))
            .with_resource("pending", ResourceState::without_primary())
    }

    #[test]
    fn pair_check_resolves_both_instances_first() {
        let m = module();
        assert!(check_set_elem_attr_pair(&m, "vm", "tags.*", "data.names", "names.0").is_ok());
        assert!(matches!(
            check_set_elem_attr_pair(&m, "vm", "tags.*", "missing", "names.0"),
            Err(CheckError::InstanceNotFound { .. })
        ));
        assert!(matches!(
            check_set_elem_attr_pair(&m, "vm", "tags.*", "pending", "names.0"),
            Err(CheckError::NoPrimaryInstance { .. })
        ));
        assert!(matches!(
            check_set_elem_attr_pair(&m, "vm", "tags.*", "data.names", "names.1"),
            Err(CheckError::AttributeNotSet { .. })
        ));
    }

    #[test]
    fn check_deserializes_from_tagged_json() {
        let check: Check = serde_json::from_str(
            r#"{"kind":"list_attr_sorted","name":"vm","attr":"tags.*","order":"desc"}"#,
        )
        .unwrap();
        assert_eq!(
            check,
            Check::ListAttrSorted {
                name: "vm".into(),
                attr: "tags.*".into(),
                order: SortOrder::Descending,
            }
        );
        assert_eq!(check.to_string(), "list_attr_sorted vm tags.* desc");
    }

    #[test]
    fn unknown_sort_order_is_a_parse_error() {
        let res: Result<Check, _> = serde_json::from_str(
            r#"{"kind":"list_attr_sorted","name":"vm","attr":"tags.*","order":"up"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn suite_reports_every_check() {
        let suite = CheckSuite::new(vec![
            Check::SetElemAttr {
                name: "vm".into(),
                attr: "tags.*".into(),
                value: "staging".into(),
            },
            Check::SetElemAttr {
                name: "vm".into(),
                attr: "tags.*".into(),
                value: "prod".into(),
            },
        ]);
        let report = suite.run(&module(), false);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped, 0);
        assert!(!report.is_success());
        assert!(!report.outcomes[0].passed());
    }

    #[test]
    fn fail_fast_skips_remaining_checks() {
        let suite = CheckSuite::new(vec![
            Check::ListAttrSorted {
                name: "missing".into(),
                attr: "tags.*".into(),
                order: SortOrder::Ascending,
            },
            Check::SetElemAttr {
                name: "vm".into(),
                attr: "tags.*".into(),
                value: "prod".into(),
            },
        ]);
        let report = suite.run(&module(), true);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.is_success());
    }
}
