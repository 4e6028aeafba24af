use std::sync::Arc;

use blackholes::domain::service::{Service, ServiceConfig};
use blackholes::infra::storage::{migrations::Migrator, SeaOrmBlackHolesRepository};
use catalog_db::{resolve, DbHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

/// Fresh in-memory SQLite database with the catalog schema.
pub async fn create_test_db() -> DatabaseConnection {
    let handle = DbHandle::connect(&resolve(Some("sqlite::memory:")))
        .await
        .expect("Failed to connect to test database");
    let db = handle.sea();
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_repo() -> Arc<SeaOrmBlackHolesRepository<DatabaseConnection>> {
    Arc::new(SeaOrmBlackHolesRepository::new(create_test_db().await))
}

#[allow(dead_code)]
pub async fn create_test_service() -> Arc<Service> {
    Arc::new(Service::new(create_test_repo().await, ServiceConfig::default()))
}
