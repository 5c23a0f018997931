use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    sync::Arc,
};

use crate::{
    errors::GetError,
    types::{ComponentKey, Injectable, Instance},
};

/// Store of all built instances, exactly one per registered component.
///
/// Populated only during the build phase, in scheduler order; entries are
/// never overwritten or removed.
#[derive(Default)]
pub(crate) struct InstanceStore {
    instances: HashMap<TypeId, Instance>,
}

impl InstanceStore {
    pub(crate) fn insert(&mut self, instance: Instance) {
        let prev = self.instances.insert(instance.key.type_id, instance);
        debug_assert!(prev.is_none(), "instance stored twice");
    }

    pub(crate) fn lookup(&self, key: ComponentKey) -> Option<&Instance> {
        self.instances.get(&key.type_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }

    /// Attempts to get the requested instance
    pub(crate) fn get<T: Injectable>(&self) -> Result<Arc<T>, GetError> {
        match self.instances.get(&TypeId::of::<T>()) {
            Some(instance) => {
                instance
                    .downcast()
                    .map_err(|actual_type| GetError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            None => Err(GetError::UnknownComponent(ComponentKey::of::<T>())),
        }
    }
}

/// View over the already built instances, handed to a factory during
/// construction. Every dependency the factory declared is guaranteed to be
/// present; anything else is a lookup miss.
pub struct Dependencies<'a> {
    store: &'a InstanceStore,
}

impl<'a> Dependencies<'a> {
    pub(crate) fn new(store: &'a InstanceStore) -> Self {
        Self { store }
    }

    pub fn get<T: Injectable>(&self) -> Result<Arc<T>, GetError> {
        self.store.get::<T>()
    }
}
