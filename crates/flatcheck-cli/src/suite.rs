// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Checks files.

use anyhow::{Context, Result};
use flatcheck_core::{Check, CheckSuite};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A checks file holds either a bare array of checks or `{ "checks": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChecksFile {
    List(Vec<Check>),
    Suite(CheckSuite),
}

impl From<ChecksFile> for CheckSuite {
    fn from(file: ChecksFile) -> Self {
        match file {
            ChecksFile::List(checks) => Self::new(checks),
            ChecksFile::Suite(suite) => suite,
        }
    }
}

/// Parse a checks file body.
pub fn parse_suite(text: &str) -> Result<CheckSuite> {
    let file: ChecksFile = serde_json::from_str(text).context("checks file is not a list of checks")?;
    Ok(file.into())
}

/// Load the checks file at `path`.
pub fn load_suite(path: &Path) -> Result<CheckSuite> {
    let f = File::open(path).with_context(|| format!("failed to open checks file {}", path.display()))?;
    let file: ChecksFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{} is not a list of checks", path.display()))?;
    Ok(file.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use flatcheck_core::SortOrder;

    #[test]
    fn bare_list_and_wrapped_suite_are_equivalent() {
        let list = r#"[{"kind":"list_attr_sorted","name":"h","attr":"hosts.*.name_label","order":"asc"}]"#;
        let wrapped = format!(r#"{{"checks": {list}}}"#);
        let a = parse_suite(list).unwrap();
        let b = parse_suite(&wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.checks,
            vec![Check::ListAttrSorted {
                name: "h".into(),
                attr: "hosts.*.name_label".into(),
                order: SortOrder::Ascending,
            }]
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(parse_suite(r#"[{"kind":"attr_equals","name":"h"}]"#).is_err());
    }
}
