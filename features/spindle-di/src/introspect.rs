use crate::{
    errors::IntrospectError,
    registry::Registry,
    types::{ComponentKey, DependencyDecl},
};

/// Resolves a component's dependency list from its declared constructor
/// parameters.
///
/// The container only assumes the introspector is pure and deterministic for
/// a given key and registry snapshot; how the list is obtained is up to the
/// implementation. It is stored inside the context, which stays shareable
/// between threads for lookups, hence the Send + Sync bound.
pub trait DependencyIntrospector: Send + Sync {
    fn dependencies_of(
        &self,
        key: ComponentKey,
        declared: &[DependencyDecl],
        registry: &Registry,
    ) -> Result<Vec<ComponentKey>, IntrospectError>;
}

/// Default introspector: trusts the factory's explicit declaration.
///
/// A parameter without a declared type is rejected, as is a dependency on a
/// component that has no registration yet. Registrations are therefore
/// order-sensitive: dependencies first, dependents after.
#[derive(Default)]
pub struct DeclaredDependencies;

impl DependencyIntrospector for DeclaredDependencies {
    fn dependencies_of(
        &self,
        key: ComponentKey,
        declared: &[DependencyDecl],
        registry: &Registry,
    ) -> Result<Vec<ComponentKey>, IntrospectError> {
        let mut dependencies = Vec::with_capacity(declared.len());
        for decl in declared {
            let dependency = decl.key.ok_or(IntrospectError::MissingAnnotation {
                component: key,
                param: decl.param,
            })?;

            if !registry.contains(dependency) {
                return Err(IntrospectError::UnregisteredDependency {
                    component: key,
                    dependency,
                });
            }

            dependencies.push(dependency);
        }

        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn empty_declaration_yields_an_empty_list() {
        let registry = Registry::default();
        let deps = DeclaredDependencies
            .dependencies_of(ComponentKey::of::<A>(), &[], &registry)
            .unwrap();

        assert!(deps.is_empty());
    }

    #[test]
    fn untyped_parameter_is_rejected() {
        let registry = Registry::default();
        let err = DeclaredDependencies
            .dependencies_of(
                ComponentKey::of::<B>(),
                &[DependencyDecl::untyped("conn")],
                &registry,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            IntrospectError::MissingAnnotation { param: "conn", .. }
        ));
    }

    #[test]
    fn unregistered_dependency_is_rejected() {
        let registry = Registry::default();
        let err = DeclaredDependencies
            .dependencies_of(
                ComponentKey::of::<B>(),
                &[DependencyDecl::of::<A>("a")],
                &registry,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            IntrospectError::UnregisteredDependency { dependency, .. }
                if dependency == ComponentKey::of::<A>()
        ));
    }
}
