//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait + TransactionTrait`, so it runs on a
//! `DatabaseConnection` (pooled, one checkout per statement) or inside a
//! transaction, where [`BlackHolesRepository::insert_many`] nests as a savepoint.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::contract::{BlackHole, NewBlackHole};
use crate::domain::repo::BlackHolesRepository;
use crate::infra::storage::entity::{ActiveModel as BlackHoleAM, Column, Entity as BlackHoleEntity};

pub struct SeaOrmBlackHolesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmBlackHolesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn active_model(new: NewBlackHole) -> BlackHoleAM {
    BlackHoleAM {
        id: NotSet,
        name: Set(new.name),
        distance_ly: Set(new.distance_ly),
        mass_solar: Set(new.mass_solar),
        description: Set(new.description),
    }
}

#[async_trait::async_trait]
impl<C> BlackHolesRepository for SeaOrmBlackHolesRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<BlackHole>> {
        let found = BlackHoleEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<BlackHole>> {
        let rows = BlackHoleEntity::find()
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new: NewBlackHole) -> anyhow::Result<BlackHole> {
        let saved = active_model(new)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        Ok(saved.into())
    }

    async fn insert_many(&self, rows: Vec<NewBlackHole>) -> anyhow::Result<Vec<BlackHole>> {
        let txn = self.conn.begin().await.context("begin failed")?;
        let mut saved = Vec::with_capacity(rows.len());
        for new in rows {
            // Dropping `txn` on error rolls back the rows already written.
            let model = active_model(new)
                .insert(&txn)
                .await
                .context("insert_many failed")?;
            saved.push(model.into());
        }
        txn.commit().await.context("commit failed")?;
        Ok(saved)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        BlackHoleEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")
    }
}
