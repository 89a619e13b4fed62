// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Builders for flattened state and module state.

use flatcheck_core::{FlatMap, ModuleState, ResourceState, COUNT_MARKER};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Fluent builder for a [`FlatMap`] using the usual flattening scheme.
///
/// Lists get numeric indices, sets get synthetic hash-like ids derived from
/// the element content, and both record their length under `<key>.#`.
///
/// # Example
///
/// ```
/// use flatcheck_dry_tests::FlatMapBuilder;
///
/// let state = FlatMapBuilder::new()
///     .attr("id", "vm-1")
///     .list("tags", ["dev", "prod"])
///     .build();
/// assert_eq!(state.get("tags.#"), Some("2"));
/// assert_eq!(state.get("tags.1"), Some("prod"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlatMapBuilder {
    attrs: BTreeMap<String, String>,
}

impl FlatMapBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single flattened attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Scalar list under `key` with indices `0..n`.
    pub fn list<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut count = 0usize;
        for (i, value) in values.into_iter().enumerate() {
            self.attrs.insert(format!("{key}.{i}"), value.into());
            count += 1;
        }
        self.count(key, count)
    }

    /// Scalar set under `key` with synthetic element ids.
    pub fn set<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut count = 0usize;
        for value in values {
            let value = value.into();
            self.attrs
                .insert(format!("{key}.{}", synthetic_id(&[value.as_str()])), value);
            count += 1;
        }
        self.count(key, count)
    }

    /// List of objects under `key`; each element is a list of
    /// `(suffix, value)` pairs.
    pub fn object_list(mut self, key: &str, elements: &[&[(&str, &str)]]) -> Self {
        for (i, element) in elements.iter().enumerate() {
            for (suffix, value) in *element {
                self.attrs
                    .insert(format!("{key}.{i}.{suffix}"), (*value).to_owned());
            }
        }
        self.count(key, elements.len())
    }

    /// Set of objects under `key` with synthetic element ids.
    pub fn object_set(mut self, key: &str, elements: &[&[(&str, &str)]]) -> Self {
        for element in elements {
            let parts: Vec<&str> = element.iter().flat_map(|(k, v)| [*k, *v]).collect();
            let id = synthetic_id(&parts);
            for (suffix, value) in *element {
                self.attrs
                    .insert(format!("{key}.{id}.{suffix}"), (*value).to_owned());
            }
        }
        self.count(key, elements.len())
    }

    /// Finish the snapshot.
    pub fn build(self) -> FlatMap {
        FlatMap::from(self.attrs)
    }

    fn count(mut self, key: &str, n: usize) -> Self {
        self.attrs.insert(format!("{key}.{COUNT_MARKER}"), n.to_string());
        self
    }
}

/// Set element id in the style of provider set hashes. Stable within one
/// toolchain, which is all tests need.
fn synthetic_id(parts: &[&str]) -> u32 {
    let mut hasher = DefaultHasher::new();
    parts.hash(&mut hasher);
    // truncation intended: provider set ids are 32-bit
    #[allow(clippy::cast_possible_truncation)]
    let id = hasher.finish() as u32;
    id
}

/// Fluent builder for a [`ModuleState`].
#[derive(Debug, Clone, Default)]
pub struct ModuleStateBuilder {
    module: ModuleState,
}

impl ModuleStateBuilder {
    /// Builder for the root module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a module at `path`.
    pub fn module(path: &str) -> Self {
        Self {
            module: ModuleState::new(path),
        }
    }

    /// Add a resource whose primary instance is `state`.
    pub fn resource(mut self, name: &str, state: FlatMap) -> Self {
        self.module.insert(name, ResourceState::with_primary(state));
        self
    }

    /// Add a resource with no primary instance.
    pub fn pending(mut self, name: &str) -> Self {
        self.module.insert(name, ResourceState::without_primary());
        self
    }

    /// Finish the module.
    pub fn build(self) -> ModuleState {
        self.module
    }
}
