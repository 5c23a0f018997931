//! Spindle DI is a minimal inversion of control container: components
//! declare their constructor dependencies, the container validates the
//! resulting graph, builds every component exactly once in dependency order
//! and wires each instance before handing it out.
//!
//! The container is split into three phases, enforced by [`AppContext`]:
//! 1. Registration: [`AppContext::register`] records each component and its
//!    resolved dependency list
//! 2. Build: [`AppContext::initialize`] validates the graph and constructs
//!    all instances, dependencies first
//! 3. Query: [`AppContext::get`] returns the single shared instance of a
//!    component
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use spindle_di::{AppContext, ComponentFactory, Dependencies, DependencyDecl, DynError};
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct DatabaseFactory;
//! impl ComponentFactory for DatabaseFactory {
//!     type Provides = Database;
//!
//!     fn dependencies() -> Vec<DependencyDecl> {
//!         Vec::new()
//!     }
//!
//!     fn construct(&mut self, _deps: &Dependencies<'_>) -> Result<Database, DynError> {
//!         Ok(Database {
//!             url: "sqlite::memory:".to_string(),
//!         })
//!     }
//! }
//!
//! struct Repository {
//!     db: Arc<Database>,
//! }
//!
//! struct RepositoryFactory;
//! impl ComponentFactory for RepositoryFactory {
//!     type Provides = Repository;
//!
//!     fn dependencies() -> Vec<DependencyDecl> {
//!         vec![DependencyDecl::of::<Database>("db")]
//!     }
//!
//!     fn construct(&mut self, deps: &Dependencies<'_>) -> Result<Repository, DynError> {
//!         Ok(Repository {
//!             db: deps.get::<Database>()?,
//!         })
//!     }
//! }
//!
//! let mut context = AppContext::new();
//! context.register(DatabaseFactory).unwrap();
//! context.register(RepositoryFactory).unwrap();
//! context.initialize().unwrap();
//!
//! let repo = context.get::<Repository>().unwrap();
//! assert_eq!(repo.db.url, "sqlite::memory:");
//! ```
//!
//! Spindle DI consists of the following components:
//!
//! 1. Context - the facade enforcing the phase state machine
//! 2. Registry - declared components and their dependency lists
//! 3. Dependency Graph - cycle/missing-edge validation and the build scheduler
//! 4. Introspector - the boundary resolving declared constructor parameters
//! 5. Factories - how components describe and perform their construction
//! 6. Errors - for configuration errors

pub mod container;
pub mod context;
pub mod dependency_graph;
pub mod errors;
pub mod factories;
pub mod introspect;
pub mod registry;
pub mod types;

pub use container::Dependencies;
pub use context::AppContext;
pub use dependency_graph::{DependencyGraph, GraphError, GraphErrors};
pub use errors::{GetError, InitError, IntrospectError, RegisterError};
pub use factories::ComponentFactory;
pub use introspect::{DeclaredDependencies, DependencyIntrospector};
pub use registry::Registry;
pub use types::{ComponentKey, DependencyDecl, DynError, Injectable};
