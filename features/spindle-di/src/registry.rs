use std::{any::TypeId, collections::HashMap};

use crate::{factories::DynFactory, types::ComponentKey};

/// Declared components and their resolved dependency lists, in registration
/// order. Duplicates are rejected before anything reaches this map.
#[derive(Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<TypeId, usize>,
}

pub(crate) struct RegistryEntry {
    pub(crate) key: ComponentKey,
    pub(crate) dependencies: Vec<ComponentKey>,
    pub(crate) factory: Box<dyn DynFactory>,
}

impl Registry {
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.index.contains_key(&key.type_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = ComponentKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    pub(crate) fn insert(&mut self, entry: RegistryEntry) {
        let prev = self.index.insert(entry.key.type_id, self.entries.len());
        debug_assert!(prev.is_none(), "key registered twice");
        self.entries.push(entry);
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub(crate) fn entry_mut(&mut self, key: ComponentKey) -> Option<&mut RegistryEntry> {
        self.index
            .get(&key.type_id)
            .copied()
            .map(|idx| &mut self.entries[idx])
    }
}
