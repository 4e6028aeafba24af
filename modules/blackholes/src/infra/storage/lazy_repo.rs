//! Repository over the process-wide lazy database handle.

use std::sync::Arc;

use anyhow::Context;
use catalog_db::LazyDb;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;

use crate::contract::{BlackHole, NewBlackHole};
use crate::domain::repo::BlackHolesRepository;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmBlackHolesRepository;

/// Connects and migrates on first use; an unreachable store fails each call
/// with [`catalog_db::DbError::Unavailable`] until it comes back.
pub struct LazyBlackHolesRepository {
    db: Arc<LazyDb>,
    schema: OnceCell<()>,
}

impl LazyBlackHolesRepository {
    pub fn new(db: Arc<LazyDb>) -> Self {
        Self {
            db,
            schema: OnceCell::new(),
        }
    }

    /// Connection with the catalog schema in place.
    pub async fn connection(&self) -> anyhow::Result<DatabaseConnection> {
        let handle = self.db.get().await?;
        self.schema
            .get_or_try_init(|| async {
                tracing::info!("Running blackholes database migrations");
                Migrator::up(handle.seaorm(), None)
                    .await
                    .context("blackholes migrations failed")
            })
            .await?;
        Ok(handle.sea())
    }

    async fn repo(&self) -> anyhow::Result<SeaOrmBlackHolesRepository<DatabaseConnection>> {
        Ok(SeaOrmBlackHolesRepository::new(self.connection().await?))
    }
}

#[async_trait::async_trait]
impl BlackHolesRepository for LazyBlackHolesRepository {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<BlackHole>> {
        self.repo().await?.find_by_id(id).await
    }

    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<BlackHole>> {
        self.repo().await?.list(limit, offset).await
    }

    async fn insert(&self, new: NewBlackHole) -> anyhow::Result<BlackHole> {
        self.repo().await?.insert(new).await
    }

    async fn insert_many(&self, rows: Vec<NewBlackHole>) -> anyhow::Result<Vec<BlackHole>> {
        self.repo().await?.insert_many(rows).await
    }

    async fn count(&self) -> anyhow::Result<u64> {
        self.repo().await?.count().await
    }
}
