mod domain;
mod infrastructure;
pub mod constants;
pub mod errors;
pub mod settings;

pub use domain::{entities, rules};
pub use infrastructure::db;

use db::{
    postgres::{create_pool, run_migrations},
    schema::{verify_schema, SchemaReport},
};
use errors::AppError;

/// Connection to the alumni store.
#[derive(Clone)]
pub struct Database {
    pub pool: sqlx::PgPool,
}

impl Database {
    pub async fn connect(config: &settings::AppConfig) -> Result<Self, AppError> {
        let pool = create_pool(config).await?;
        Ok(Database { pool })
    }

    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        Database { pool }
    }

    /// Brings the schema up to date and checks the result against the catalog.
    pub async fn migrate(&self) -> Result<SchemaReport, AppError> {
        run_migrations(&self.pool).await?;
        verify_schema(&self.pool).await
    }
}
