use crate::contract::{BlackHole, NewBlackHole};
use async_trait::async_trait;

/// Persistence operations the domain needs.
#[async_trait]
pub trait BlackHolesRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<BlackHole>>;
    /// Page of entries ordered by id.
    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<BlackHole>>;
    /// Persist a new entry and return it with its assigned id.
    async fn insert(&self, new: NewBlackHole) -> anyhow::Result<BlackHole>;
    /// Persist all entries or none of them.
    async fn insert_many(&self, rows: Vec<NewBlackHole>) -> anyhow::Result<Vec<BlackHole>>;
    async fn count(&self) -> anyhow::Result<u64>;
}
