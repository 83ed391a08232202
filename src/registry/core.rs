use std::collections::HashMap;

use crate::value::ValueKind;

/// A single attribute declaration: name plus value kind.
pub type AttrDescriptor = (&'static str, ValueKind);

/// Immutable name → kind table for one widget kind.
///
/// Built by [`AttrRegistry::compose`], which unions a base registry with a
/// kind's own descriptor table. Attribute names carry one meaning across the
/// whole hierarchy, so a name may only be re-declared with the same kind.
#[derive(Debug, Clone, Default)]
pub struct AttrRegistry {
    entries: HashMap<&'static str, ValueKind>,
}

impl AttrRegistry {
    /// Build a registry from an optional base and a descriptor table.
    ///
    /// Panics if `table` re-declares a base entry with a different kind.
    /// That is a programming error in the descriptor tables, and decoding a
    /// stored value under the wrong kind later would be far worse than
    /// failing here.
    pub fn compose(base: Option<&AttrRegistry>, table: &[AttrDescriptor]) -> Self {
        let mut entries = base.map(|b| b.entries.clone()).unwrap_or_default();
        for &(name, kind) in table {
            if let Some(&existing) = entries.get(name) {
                if existing != kind {
                    panic!(
                        "attribute `{name}` re-declared as {kind:?}, already registered as {existing:?}"
                    );
                }
            }
            entries.insert(name, kind);
        }
        Self { entries }
    }

    /// Look up the declared kind for an attribute name.
    pub fn lookup(&self, name: &str) -> Option<ValueKind> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
