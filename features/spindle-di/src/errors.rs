use std::sync::Arc;

use thiserror::Error;

use crate::{
    dependency_graph::GraphErrors,
    types::{ComponentKey, DynError},
};

/// Errors while registering a component
#[derive(Error, Debug, Clone)]
pub enum RegisterError {
    /// The same key was registered twice
    #[error("component '{0}' is already registered")]
    Duplicate(ComponentKey),
    /// Registration was attempted on a built context
    #[error("cannot register '{0}', the context is already built")]
    AlreadyBuilt(ComponentKey),
    /// The introspector rejected the component's declared constructor
    #[error(transparent)]
    Introspect(#[from] IntrospectError),
}

/// Errors reported by a dependency introspector
#[derive(Error, Debug, Clone)]
pub enum IntrospectError {
    /// A constructor parameter carries no dependency type
    #[error("parameter '{param}' of component '{component}' has no declared dependency type")]
    MissingAnnotation {
        component: ComponentKey,
        param: &'static str,
    },
    /// A declared dependency has no registration
    #[error("component '{component}' depends on '{dependency}' which is not registered")]
    UnregisteredDependency {
        component: ComponentKey,
        dependency: ComponentKey,
    },
}

/// Errors while building the instances
#[derive(Error, Debug, Clone)]
pub enum InitError {
    /// `initialize` was called a second time
    #[error("the context is already initialized")]
    AlreadyInitialized,
    /// There are issues with the dependency graph
    #[error(transparent)]
    Graph(#[from] GraphErrors),
    /// A factory failed to construct its component
    #[error("factory for '{component}' failed - error: {error:?}")]
    FactoryFailed {
        component: ComponentKey,
        error: Arc<DynError>,
    },
}

/// Errors when looking up a built instance
#[derive(Error, Debug, Clone)]
pub enum GetError {
    /// `get` was called before `initialize`
    #[error("the context is not initialized")]
    NotInitialized,
    /// The requested key was never registered
    #[error("component '{0}' was never registered")]
    UnknownComponent(ComponentKey),

    #[error("failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}
