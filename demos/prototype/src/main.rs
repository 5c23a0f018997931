use spindle_di::{AppContext, DynError};
use tracing_subscriber::EnvFilter;

use crate::components::{AppConfig, DatabaseFactory, HealthService, HealthServiceFactory};

mod components;

fn main() -> Result<(), DynError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let mut context = AppContext::new();
    context.register_instance(config)?; // registers an existing value components can depend on
    context.register(DatabaseFactory)?;
    context.register(HealthServiceFactory)?;

    context.initialize()?;
    tracing::debug!("{context:?}");

    let health = context.get::<HealthService>()?;
    tracing::info!("{}", health.report());

    Ok(())
}
