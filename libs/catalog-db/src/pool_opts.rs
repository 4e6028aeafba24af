//! Maps resolved engine parameters onto sqlx pool builders.

use crate::resolver::EngineParams;

pub(crate) trait ApplyEngineParams {
    fn apply(self, params: &EngineParams) -> Self;
}

#[cfg(feature = "pg")]
impl ApplyEngineParams for sqlx::postgres::PgPoolOptions {
    fn apply(mut self, params: &EngineParams) -> Self {
        if let Some(n) = params.max_connections() {
            self = self.max_connections(n);
        }
        self.test_before_acquire(params.pool_pre_ping)
    }
}

#[cfg(feature = "sqlite")]
impl ApplyEngineParams for sqlx::sqlite::SqlitePoolOptions {
    fn apply(mut self, params: &EngineParams) -> Self {
        if let Some(n) = params.max_connections() {
            self = self.max_connections(n);
        }
        self.test_before_acquire(params.pool_pre_ping)
    }
}
