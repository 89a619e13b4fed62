// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Instance lookup by resource name.

use crate::error::CheckError;
use crate::flatmap::FlatMap;
use std::collections::BTreeMap;

/// Module path used when a state document does not name one.
pub const ROOT_MODULE: &str = "root";

/// Resolves resource names to the flattened state of their primary instance.
///
/// Implementations only need to be readable; checks never write through this
/// trait, so a shared source may serve concurrent checks.
pub trait StateSource {
    /// Primary instance state of `name`.
    ///
    /// Fails with [`CheckError::InstanceNotFound`] or
    /// [`CheckError::NoPrimaryInstance`].
    fn instance(&self, name: &str) -> Result<&FlatMap, CheckError>;
}

/// One resource as recorded in module state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    /// Primary instance, absent while the resource is pending or tainted away.
    pub primary: Option<FlatMap>,
}

impl ResourceState {
    /// Resource with a primary instance.
    pub fn with_primary(primary: FlatMap) -> Self {
        Self {
            primary: Some(primary),
        }
    }

    /// Resource recorded without a primary instance.
    pub fn without_primary() -> Self {
        Self::default()
    }
}

/// In-memory module state: the resources of one module keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleState {
    path: String,
    resources: BTreeMap<String, ResourceState>,
}

impl ModuleState {
    /// Empty module at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Module path used in lookup errors.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Record `resource` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, resource: ResourceState) {
        self.resources.insert(name.into(), resource);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_resource(mut self, name: impl Into<String>, resource: ResourceState) -> Self {
        self.insert(name, resource);
        self
    }

    /// Resource recorded under `name`.
    pub fn resource(&self, name: &str) -> Option<&ResourceState> {
        self.resources.get(name)
    }

    /// Names of all recorded resources, in order.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.resources.keys().map(String::as_str)
    }

    /// Number of recorded resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when no resource is recorded.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ModuleState {
    fn default() -> Self {
        Self::new(ROOT_MODULE)
    }
}

impl StateSource for ModuleState {
    fn instance(&self, name: &str) -> Result<&FlatMap, CheckError> {
        let resource = self
            .resources
            .get(name)
            .ok_or_else(|| CheckError::InstanceNotFound {
                name: name.to_owned(),
                module: self.path.clone(),
            })?;
        resource
            .primary
            .as_ref()
            .ok_or_else(|| CheckError::NoPrimaryInstance {
                name: name.to_owned(),
                module: self.path.clone(),
            })
    }
}
