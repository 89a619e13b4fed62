// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! State document shape and loading.

use crate::error::SnapshotError;
use crate::flatten::{flatten_object_into, scalar_text};
use flatcheck_core::{FlatMap, ModuleState, ResourceState, ROOT_MODULE};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StateDocument {
    #[serde(default = "root_module")]
    module: String,
    #[serde(default)]
    resources: BTreeMap<String, ResourceDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceDocument {
    #[serde(default)]
    primary: Option<InstanceDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstanceDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
    #[serde(default)]
    values: Option<Value>,
}

fn root_module() -> String {
    ROOT_MODULE.to_owned()
}

/// Load the state document at `path`.
pub fn load_state(path: &Path) -> Result<ModuleState, SnapshotError> {
    info!(path = %path.display(), "loading state document");
    let file = File::open(path)?;
    read_state(BufReader::new(file))
}

/// Read a state document from `reader`.
pub fn read_state<R: Read>(reader: R) -> Result<ModuleState, SnapshotError> {
    let doc: StateDocument = serde_json::from_reader(reader)?;
    build_module(doc)
}

/// Parse a state document held in memory.
pub fn parse_state(text: &str) -> Result<ModuleState, SnapshotError> {
    let doc: StateDocument = serde_json::from_str(text)?;
    build_module(doc)
}

fn build_module(doc: StateDocument) -> Result<ModuleState, SnapshotError> {
    let mut module = ModuleState::new(doc.module);
    for (name, resource) in doc.resources {
        let state = match resource.primary {
            Some(instance) => ResourceState::with_primary(build_instance(&name, instance)?),
            None => ResourceState::without_primary(),
        };
        debug!(
            resource = %name,
            attributes = state.primary.as_ref().map_or(0, FlatMap::len),
            "loaded resource"
        );
        module.insert(name, state);
    }
    Ok(module)
}

fn build_instance(name: &str, instance: InstanceDocument) -> Result<FlatMap, SnapshotError> {
    let mut attrs = BTreeMap::new();

    match instance.values {
        None | Some(Value::Null) => {}
        Some(Value::Object(values)) => flatten_object_into(&values, &mut attrs),
        Some(_) => {
            return Err(SnapshotError::ValuesNotObject {
                resource: name.to_owned(),
            })
        }
    }

    for (key, value) in instance.attributes {
        if value.is_null() {
            continue;
        }
        let text = scalar_text(&value).ok_or_else(|| SnapshotError::NonScalarAttribute {
            resource: name.to_owned(),
            key: key.clone(),
        })?;
        attrs.insert(key, text);
    }

    if let Some(id) = instance.id {
        attrs.entry("id".to_owned()).or_insert(id);
    }
    Ok(FlatMap::from(attrs))
}
