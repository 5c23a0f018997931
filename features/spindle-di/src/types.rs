use std::{
    any::{Any, TypeId},
    sync::Arc,
};

/// Factory failures are opaque to the container
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// A built context may be shared between threads for lookups,
/// so anything stored in it needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Process-wide unique identifier of a component type.
///
/// Identity is the [`TypeId`]; the name is carried for diagnostics only.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ComponentKey {
    pub type_id: TypeId,
    pub type_name: &'static str,
}
impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl ComponentKey {
    pub fn of<T: 'static + ?Sized>() -> ComponentKey {
        ComponentKey {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// One constructor parameter as declared by a factory, in positional order.
///
/// A declaration without a key models a parameter whose dependency type was
/// never stated; the introspector rejects it during registration.
#[derive(Debug, Clone, Copy)]
pub struct DependencyDecl {
    /// Parameter name, for error messages
    pub param: &'static str,
    /// Declared dependency key
    pub key: Option<ComponentKey>,
}
impl DependencyDecl {
    pub fn of<T: Injectable>(param: &'static str) -> DependencyDecl {
        DependencyDecl {
            param,
            key: Some(ComponentKey::of::<T>()),
        }
    }

    pub fn untyped(param: &'static str) -> DependencyDecl {
        DependencyDecl { param, key: None }
    }
}

/// Instance of a component
#[derive(Clone)]
pub struct Instance {
    pub key: ComponentKey,
    instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub(crate) fn new<T: Injectable>(instance: T) -> Self {
        Instance::from_arc(Arc::new(instance))
    }

    pub(crate) fn from_arc<T: Injectable>(instance: Arc<T>) -> Self {
        Instance {
            key: ComponentKey::of::<T>(),
            instance,
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.key.type_name),
        }
    }
}
