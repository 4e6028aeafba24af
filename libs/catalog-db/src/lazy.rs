//! Process-wide database handle built on first use.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::resolver::ResolvedDatabase;
use crate::{DbError, DbHandle, Result};

/// Connects on the first [`LazyDb::get`] and shares the handle afterwards.
///
/// Concurrent first callers wait on a single connection attempt. A failed
/// attempt leaves the cell empty, so the next caller tries again.
#[derive(Debug)]
pub struct LazyDb {
    resolved: ResolvedDatabase,
    cell: OnceCell<Arc<DbHandle>>,
}

impl LazyDb {
    pub fn new(resolved: ResolvedDatabase) -> Self {
        Self {
            resolved,
            cell: OnceCell::new(),
        }
    }

    pub fn resolved(&self) -> &ResolvedDatabase {
        &self.resolved
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Handle if a previous call already connected.
    pub fn get_if_ready(&self) -> Option<Arc<DbHandle>> {
        self.cell.get().cloned()
    }

    /// Shared handle, connecting first if needed.
    ///
    /// Any connection failure is reported as [`DbError::Unavailable`].
    pub async fn get(&self) -> Result<Arc<DbHandle>> {
        self.cell
            .get_or_try_init(|| async {
                match DbHandle::connect(&self.resolved).await {
                    Ok(handle) => {
                        tracing::info!(dsn = %handle.dsn(), "database handle ready");
                        Ok(Arc::new(handle))
                    }
                    Err(e) => {
                        tracing::warn!(
                            dsn = %self.resolved.descriptor.redacted(),
                            error = %e,
                            "database connection failed"
                        );
                        Err(DbError::Unavailable(e.to_string()))
                    }
                }
            })
            .await
            .cloned()
    }
}
