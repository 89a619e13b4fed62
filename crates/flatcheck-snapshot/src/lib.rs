// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON state documents for flatcheck.
//!
//! A state document names a module and its resources; each resource carries
//! an optional primary instance given as already-flat `attributes`, as nested
//! `values` flattened on load, or both:
//!
//! ```json
//! {
//!   "module": "root",
//!   "resources": {
//!     "data.xenorchestra_hosts.hosts": {
//!       "primary": { "id": "0aea61f4", "attributes": { "hosts.#": "1", "hosts.0.name_label": "R620-L1" } }
//!     },
//!     "xenorchestra_vm.vm": {
//!       "primary": { "values": { "tags": ["web", "prod"], "disk": [{ "name_label": "root" }] } }
//!     },
//!     "xenorchestra_vm.pending": {}
//!   }
//! }
//! ```
//!
//! Flat `attributes` win over flattened `values` on key collisions.
#![forbid(unsafe_code)]

mod document;
mod error;
mod flatten;

pub use document::{load_state, parse_state, read_state};
pub use error::SnapshotError;
pub use flatten::flatten_values;
