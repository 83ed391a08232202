use std::collections::HashMap;

use crate::error::{Result, UiError};
use crate::registry::AttrRegistry;
use crate::value::AttrValue;

/// Mapping from attribute name to the last value set on a widget.
///
/// A name present in the store always exists in the owning kind's registry
/// with a matching kind; [`AttrStore::set`] enforces that. The store never
/// reflects live peer state — only what the application last requested.
#[derive(Debug, Default)]
pub struct AttrStore {
    values: HashMap<String, AttrValue>,
}

impl AttrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `value` against `registry` and store it.
    ///
    /// Unknown names and kind mismatches leave the store unchanged and
    /// report the failure; they are never fatal. Overwriting a `Text` value
    /// drops the previous payload.
    pub fn set(&mut self, registry: &AttrRegistry, name: &str, value: AttrValue) -> Result<()> {
        let expected = registry
            .lookup(name)
            .ok_or_else(|| UiError::UnknownAttribute(name.to_string()))?;
        if value.kind() != expected {
            return Err(UiError::KindMismatch {
                name: name.to_string(),
                expected,
                found: value.kind(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Read back the locally cached value. Attributes never set are absent.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    /// Snapshot every stored pair for replay.
    ///
    /// Iteration order is unspecified but fixed for the lifetime of the map
    /// contents, so consecutive replays without intervening mutation produce
    /// the same sequence. Snapshotting up front keeps replay free to issue
    /// remote calls without holding a borrow on the store.
    pub fn snapshot(&self) -> Vec<(String, AttrValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
