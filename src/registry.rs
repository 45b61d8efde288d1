//! Named constructor registries
//!
//! Storage backends and bank adapters are selected by name from the
//! settings. Each kind has a registry mapping names to constructors.

use std::collections::BTreeMap;

use crate::error::{BudgetError, BudgetResult};

/// Maps names to constructors of one kind of adapter
#[derive(Debug, Clone)]
pub struct Registry<F> {
    kind: &'static str,
    entries: BTreeMap<String, F>,
}

impl<F> Registry<F> {
    /// An empty registry for adapters of the given kind (used in errors)
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Register a constructor, replacing any previous one with that name
    pub fn register(&mut self, name: impl Into<String>, constructor: F) -> &mut Self {
        self.entries.insert(name.into(), constructor);
        self
    }

    /// Look up a constructor
    pub fn get(&self, name: &str) -> BudgetResult<&F> {
        self.entries
            .get(name)
            .ok_or_else(|| BudgetError::UnknownAdapter {
                kind: self.kind,
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
