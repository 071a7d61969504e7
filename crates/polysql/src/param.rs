//! Named parameter storage.
//!
//! [`ParameterManager`] owns the name → value table of one builder. Generated
//! names (`@_p_0`, `@_p_1`, ...) and names added explicitly share one namespace:
//! the generator skips any name that is already bound, so the two paths can be
//! mixed freely without collisions.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// Named parameters of one builder.
///
/// `Clone` produces an independent copy of every binding.
#[derive(Debug, Clone)]
pub struct ParameterManager {
    prefix: String,
    params: BTreeMap<String, Value>,
    next_index: usize,
}

impl ParameterManager {
    /// Create an empty manager using the dialect's marker prefix (e.g. `@`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            params: BTreeMap::new(),
            next_index: 0,
        }
    }

    /// The marker prefix names are normalized to.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a name that is not currently bound.
    ///
    /// The counter never goes backwards (not even on [`clear`](Self::clear)), so a
    /// name handed out earlier is never handed out again by this manager.
    pub fn generate_name(&mut self) -> String {
        loop {
            let name = format!("{}_p_{}", self.prefix, self.next_index);
            self.next_index += 1;
            if !self.params.contains_key(&name) {
                return name;
            }
        }
    }

    /// Bind `value` under `name` and return the normalized name.
    ///
    /// Names without the marker prefix get it prepended; rebinding an existing
    /// name overwrites its value.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> SqlResult<String> {
        let name = self.normalize(name)?;
        self.params.insert(name.clone(), value.into());
        Ok(name)
    }

    /// Generate a fresh name, bind `value` to it and return the name.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let name = self.generate_name();
        self.params.insert(name.clone(), value.into());
        name
    }

    /// Bind `value` under a name that is already normalized.
    pub(crate) fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.params.insert(name.to_string(), value.into());
    }

    /// Get the value bound to `name` (prefix optional).
    pub fn get(&self, name: &str) -> Option<&Value> {
        let name = self.normalize(name).ok()?;
        self.params.get(&name)
    }

    /// Check whether `name` (prefix optional) is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameter is bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Read-only view of all bindings, ordered by name.
    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    fn normalize(&self, name: &str) -> SqlResult<String> {
        let name = name.trim();
        if name.is_empty() || name == self.prefix {
            return Err(SqlError::argument("parameter name cannot be blank"));
        }
        if name.starts_with(&self.prefix) {
            Ok(name.to_string())
        } else {
            Ok(format!("{}{}", self.prefix, name))
        }
    }
}
