use std::sync::Arc;

use crate::{
    container::Dependencies,
    types::{ComponentKey, DependencyDecl, DynError, Injectable, Instance},
};

/// A factory providing the single instance of a component type.
///
/// `dependencies` is the component's constructor signature: declared once,
/// in positional order. During the build phase `construct` is called exactly
/// once, after every declared dependency has been built.
///
/// Factories live inside the context, and a built context may be shared
/// between threads for lookups, so they must be Send + Sync themselves.
pub trait ComponentFactory: Send + Sync {
    type Provides: Injectable;

    /// Key of the component this factory provides
    fn provides() -> ComponentKey {
        ComponentKey::of::<Self::Provides>()
    }

    /// Declared constructor parameters, in positional order
    fn dependencies() -> Vec<DependencyDecl>;

    /// Constructs the component, pulling declared dependencies from the
    /// already built instances
    fn construct(&mut self, deps: &Dependencies<'_>) -> Result<Self::Provides, DynError>;
}

/// Wrapper trait for factories, providing instances of Any
pub(crate) trait DynFactory: Send + Sync {
    fn provides(&self) -> ComponentKey;

    fn dependencies(&self) -> Vec<DependencyDecl>;

    fn construct(&mut self, deps: &Dependencies<'_>) -> Result<Instance, DynError>;
}
// Impl DynFactory for any ComponentFactory
impl<T: Injectable, SpecificFactory: ComponentFactory<Provides = T>> DynFactory
    for SpecificFactory
{
    fn provides(&self) -> ComponentKey {
        SpecificFactory::provides()
    }

    fn dependencies(&self) -> Vec<DependencyDecl> {
        SpecificFactory::dependencies()
    }

    fn construct(&mut self, deps: &Dependencies<'_>) -> Result<Instance, DynError> {
        // Forward the call to the specific implementation
        SpecificFactory::construct(self, deps).map(Instance::new)
    }
}

/// Factory wrapping a value that was constructed ahead of registration.
///
/// Keeps the value behind an Arc and hands out the same instance on every
/// build, so a failed `initialize` does not consume it.
pub(crate) struct Seeded<T: Injectable> {
    instance: Arc<T>,
}

impl<T: Injectable> Seeded<T> {
    pub(crate) fn new(instance: T) -> Self {
        Seeded {
            instance: Arc::new(instance),
        }
    }
}

impl<T: Injectable> DynFactory for Seeded<T> {
    fn provides(&self) -> ComponentKey {
        ComponentKey::of::<T>()
    }

    fn dependencies(&self) -> Vec<DependencyDecl> {
        Vec::new()
    }

    fn construct(&mut self, _deps: &Dependencies<'_>) -> Result<Instance, DynError> {
        Ok(Instance::from_arc(self.instance.clone()))
    }
}
