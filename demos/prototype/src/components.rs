use std::sync::Arc;

use spindle_di::{ComponentFactory, Dependencies, DependencyDecl, DynError};

/// Settings shared by the rest of the components
#[derive(Debug)]
pub struct AppConfig {
    pub app_name: String,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        AppConfig {
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "prototype".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
        }
    }
}

pub struct Database {
    url: String,
}

impl Database {
    pub fn ping(&self) -> bool {
        // A real component would talk to the database here
        !self.url.is_empty()
    }
}

pub struct DatabaseFactory;
impl ComponentFactory for DatabaseFactory {
    type Provides = Database;

    fn dependencies() -> Vec<DependencyDecl> {
        vec![DependencyDecl::of::<AppConfig>("config")]
    }

    fn construct(&mut self, deps: &Dependencies<'_>) -> Result<Database, DynError> {
        let config = deps.get::<AppConfig>()?;
        tracing::info!("Connecting to {}", config.database_url);
        Ok(Database {
            url: config.database_url.clone(),
        })
    }
}

pub struct HealthService {
    config: Arc<AppConfig>,
    database: Arc<Database>,
}

impl HealthService {
    pub fn report(&self) -> String {
        let database = if self.database.ping() { "up" } else { "down" };
        format!("{}: database {}", self.config.app_name, database)
    }
}

pub struct HealthServiceFactory;
impl ComponentFactory for HealthServiceFactory {
    type Provides = HealthService;

    fn dependencies() -> Vec<DependencyDecl> {
        vec![
            DependencyDecl::of::<AppConfig>("config"),
            DependencyDecl::of::<Database>("database"),
        ]
    }

    fn construct(&mut self, deps: &Dependencies<'_>) -> Result<HealthService, DynError> {
        Ok(HealthService {
            config: deps.get::<AppConfig>()?,
            database: deps.get::<Database>()?,
        })
    }
}
