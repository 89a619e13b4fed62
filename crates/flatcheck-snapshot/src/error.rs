// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Failures while reading a state document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid JSON or does not have the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A flat attribute holds an array or object.
    #[error("{resource}: attribute {key:?} is not a scalar")]
    NonScalarAttribute {
        /// Resource name.
        resource: String,
        /// Attribute key.
        key: String,
    },
    /// Nested `values` must be a JSON object at the top level.
    #[error("{resource}: values must be a JSON object")]
    ValuesNotObject {
        /// Resource name.
        resource: String,
    },
}
