use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
};

use thiserror::Error;

use crate::{registry::Registry, types::ComponentKey};

/// Directed dependency graph of all registered components.
///
/// Checked for cycles and missing edges before anything is constructed,
/// then consumed batch by batch by the build scheduler.
pub struct DependencyGraph {
    entries: Vec<GraphEntry>,
    index: HashMap<TypeId, usize>,
}

struct GraphEntry {
    key: ComponentKey,
    dependencies: Vec<ComponentKey>,
}

impl DependencyGraph {
    pub(crate) fn new(registry: &Registry) -> Self {
        let mut graph = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for entry in registry.entries() {
            graph.add(entry.key, entry.dependencies.clone());
        }

        graph
    }

    /// Entries keep registration order so scheduling stays deterministic
    pub(crate) fn add(&mut self, key: ComponentKey, dependencies: Vec<ComponentKey>) {
        let prev = self.index.insert(key.type_id, self.entries.len());
        debug_assert!(prev.is_none(), "key added to graph twice");
        self.entries.push(GraphEntry { key, dependencies });
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

    pub fn dependencies_of(&self, key: ComponentKey) -> Option<&[ComponentKey]> {
        self.index
            .get(&key.type_id)
            .map(|&idx| self.entries[idx].dependencies.as_slice())
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), GraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = Vec::new();
        for entry in &self.entries {
            let mut dependency_chain = Vec::new();
            check_recurse(
                self,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                entry,
            );
        }

        if !errors.is_empty() {
            return Err(GraphErrors { errors });
        }

        return Ok(());

        fn check_recurse(
            graph: &DependencyGraph,
            checked: &mut HashSet<TypeId>,
            errors: &mut Vec<GraphError>,
            dependency_chain: &mut Vec<ComponentKey>,
            entry: &GraphEntry,
        ) {
            // Circular dependency check
            if dependency_chain.contains(&entry.key) {
                let from = *dependency_chain.first().expect("must have entries");
                let to = entry.key;

                let mut chain = dependency_chain.clone();
                chain.push(to); // Add current so chain is complete

                errors.push(GraphError::CircularDependency { from, to, chain });
            }

            // Skip other checks if already checked
            if !checked.insert(entry.key.type_id) {
                return;
            };

            dependency_chain.push(entry.key);

            for dependency in &entry.dependencies {
                let Some(&next_idx) = graph.index.get(&dependency.type_id) else {
                    errors.push(GraphError::MissingDependency {
                        dependency: *dependency,
                        required_by: entry.key,
                    });

                    continue;
                };

                check_recurse(
                    graph,
                    checked,
                    errors,
                    dependency_chain,
                    &graph.entries[next_idx],
                );
            }

            dependency_chain.pop();
        }
    }

    /// Releases the keys in waves: each batch holds every key whose
    /// dependencies are all in earlier batches, ties broken by registration
    /// order. Must only be called on a graph that passed [`Self::check`].
    pub(crate) fn batches(&self) -> Vec<Vec<ComponentKey>> {
        let mut in_degree: Vec<usize> = self
            .entries
            .iter()
            .map(|entry| entry.dependencies.len())
            .collect();

        let mut dependents: HashMap<TypeId, Vec<usize>> = HashMap::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            for dependency in &entry.dependencies {
                dependents.entry(dependency.type_id).or_default().push(idx);
            }
        }

        let mut batches = Vec::new();
        let mut ready: Vec<usize> = (0..self.entries.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();

        while !ready.is_empty() {
            let mut next = Vec::new();
            for &idx in &ready {
                let key = self.entries[idx].key;
                for &dependent in dependents.get(&key.type_id).into_iter().flatten() {
                    in_degree[dependent] -= 1;
                    if in_degree[dependent] == 0 {
                        next.push(dependent);
                    }
                }
            }

            batches.push(ready.iter().map(|&idx| self.entries[idx].key).collect());
            next.sort_unstable();
            ready = next;
        }

        batches
    }
}

#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("'{required_by}' needs '{dependency}' but it is missing")]
    MissingDependency {
        dependency: ComponentKey,
        required_by: ComponentKey,
    },
    #[error("a circular dependency exists between '{from}' and '{to}' through {chain:?}")]
    CircularDependency {
        from: ComponentKey,
        to: ComponentKey,
        chain: Vec<ComponentKey>,
    },
}

#[derive(Error, Debug, Clone)]
pub struct GraphErrors {
    pub errors: Vec<GraphError>,
}
impl std::fmt::Display for GraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;
    struct C;
    struct D;

    fn key<T: 'static>() -> ComponentKey {
        ComponentKey::of::<T>()
    }

    fn empty_graph() -> DependencyGraph {
        DependencyGraph {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    #[test]
    fn check_accepts_an_acyclic_graph() {
        let mut graph = empty_graph();
        graph.add(key::<A>(), vec![]);
        graph.add(key::<B>(), vec![key::<A>()]);

        assert!(graph.check().is_ok());
    }

    #[test]
    fn check_reports_a_missing_dependency() {
        let mut graph = empty_graph();
        graph.add(key::<B>(), vec![key::<A>()]);

        let errors = graph.check().unwrap_err().errors;
        assert!(matches!(
            errors.as_slice(),
            [GraphError::MissingDependency { dependency, required_by }]
                if *dependency == key::<A>() && *required_by == key::<B>()
        ));
    }

    #[test]
    fn check_reports_a_cycle_with_its_chain() {
        let mut graph = empty_graph();
        graph.add(key::<A>(), vec![key::<B>()]);
        graph.add(key::<B>(), vec![key::<A>()]);

        let errors = graph.check().unwrap_err().errors;
        let chain = match errors.as_slice() {
            [GraphError::CircularDependency { chain, .. }] => chain,
            other => panic!("expected a single cycle, got {other:?}"),
        };
        assert!(chain.contains(&key::<A>()));
        assert!(chain.contains(&key::<B>()));
    }

    #[test]
    fn batches_respect_dependencies_and_registration_order() {
        let mut graph = empty_graph();
        // Diamond: D depends on B and C, both depend on A
        graph.add(key::<A>(), vec![]);
        graph.add(key::<B>(), vec![key::<A>()]);
        graph.add(key::<C>(), vec![key::<A>()]);
        graph.add(key::<D>(), vec![key::<B>(), key::<C>()]);

        let batches = graph.batches();
        assert_eq!(
            batches,
            vec![
                vec![key::<A>()],
                vec![key::<B>(), key::<C>()],
                vec![key::<D>()],
            ]
        );
    }

    #[test]
    fn batches_of_independent_keys_follow_registration_order() {
        let mut graph = empty_graph();
        graph.add(key::<C>(), vec![]);
        graph.add(key::<A>(), vec![]);
        graph.add(key::<B>(), vec![]);

        assert_eq!(graph.batches(), vec![vec![key::<C>(), key::<A>(), key::<B>()]]);
    }
}
