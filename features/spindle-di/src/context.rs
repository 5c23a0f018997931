use std::{fmt::Debug, sync::Arc};

use crate::{
    container::{Dependencies, InstanceStore},
    dependency_graph::DependencyGraph,
    errors::{GetError, InitError, RegisterError},
    factories::{ComponentFactory, DynFactory, Seeded},
    introspect::{DeclaredDependencies, DependencyIntrospector},
    registry::{Registry, RegistryEntry},
    types::Injectable,
};

/// Phase of the context lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextState {
    /// No components registered yet
    Empty,
    /// Accepting registrations
    Registering,
    /// All instances built, lookups enabled. Terminal.
    Built,
}

/// The container facade.
///
/// Coordinates the registry, the graph scheduler and the instance store,
/// and enforces the registration -> build -> query phase machine: `register`
/// is rejected once built, `get` is rejected until built, and `initialize`
/// runs at most once.
pub struct AppContext {
    state: ContextState,
    registry: Registry,
    instances: InstanceStore,
    graph: Option<DependencyGraph>,
    introspector: Box<dyn DependencyIntrospector>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("AppContext");
        for key in self.registry.keys() {
            let val = if self.instances.lookup(key).is_some() {
                "built"
            } else {
                "registered"
            };
            map.field(key.type_name, &val);
        }
        map.finish()
    }
}

impl AppContext {
    pub fn new() -> Self {
        Self::with_introspector(DeclaredDependencies)
    }

    /// Context with a custom dependency introspector
    pub fn with_introspector<I: DependencyIntrospector + 'static>(introspector: I) -> Self {
        AppContext {
            state: ContextState::Empty,
            registry: Registry::default(),
            instances: InstanceStore::default(),
            graph: None,
            introspector: Box::new(introspector),
        }
    }

    /// Registers a component by its factory.
    ///
    /// The introspector resolves the factory's declared constructor
    /// parameters against the current registry snapshot, so dependencies
    /// must be registered before their dependents.
    pub fn register<Factory: ComponentFactory + 'static>(
        &mut self,
        factory: Factory,
    ) -> Result<(), RegisterError> {
        self.register_boxed(Box::new(factory))
    }

    /// Registers an instance constructed ahead of time as a component with
    /// no dependencies
    pub fn register_instance<T: Injectable>(&mut self, instance: T) -> Result<(), RegisterError> {
        self.register_boxed(Box::new(Seeded::new(instance)))
    }

    fn register_boxed(&mut self, factory: Box<dyn DynFactory>) -> Result<(), RegisterError> {
        let key = factory.provides();

        if self.state == ContextState::Built {
            return Err(RegisterError::AlreadyBuilt(key));
        }
        if self.registry.contains(key) {
            return Err(RegisterError::Duplicate(key));
        }

        let declared = factory.dependencies();
        let dependencies = self
            .introspector
            .dependencies_of(key, &declared, &self.registry)?;

        tracing::debug!(
            "Registered {} with {} dependencies",
            key,
            dependencies.len()
        );

        self.registry.insert(RegistryEntry {
            key,
            dependencies,
            factory,
        });
        self.state = ContextState::Registering;

        Ok(())
    }

    /// Validates the dependency graph and builds every registered component,
    /// dependencies before dependents.
    ///
    /// On failure nothing is committed: the context stays in the
    /// registration phase and no partial set of instances is ever observable
    /// through [`Self::get`].
    pub fn initialize(&mut self) -> Result<(), InitError> {
        if self.state == ContextState::Built {
            return Err(InitError::AlreadyInitialized);
        }

        tracing::debug!(
            "Initializing context with {} registered components",
            self.registry.len()
        );

        let graph = DependencyGraph::new(&self.registry);
        graph.check()?;

        let mut store = InstanceStore::default();
        for batch in graph.batches() {
            tracing::debug!("Scheduler released {} ready components", batch.len());

            for key in batch {
                let instance = {
                    let deps = Dependencies::new(&store);
                    let entry = self
                        .registry
                        .entry_mut(key)
                        .expect("scheduled key must be registered");

                    entry
                        .factory
                        .construct(&deps)
                        .map_err(|error| InitError::FactoryFailed {
                            component: key,
                            error: Arc::new(error),
                        })?
                };

                tracing::debug!("Constructed instance of {}", instance.key);
                store.insert(instance);
            }
        }

        debug_assert_eq!(store.len(), self.registry.len());

        self.instances = store;
        self.graph = Some(graph);
        self.state = ContextState::Built;

        tracing::debug!("All components built - context is ready");

        Ok(())
    }

    /// Looks up the single built instance of a component
    pub fn get<T: Injectable>(&self) -> Result<Arc<T>, GetError> {
        if self.state != ContextState::Built {
            return Err(GetError::NotInitialized);
        }

        self.instances.get::<T>()
    }

    pub fn is_built(&self) -> bool {
        self.state == ContextState::Built
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The validated dependency graph, available once built
    pub fn dependency_graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }
}
