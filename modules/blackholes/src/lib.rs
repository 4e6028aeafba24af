//! Black hole catalog module: entity, migrations, domain service and REST routes.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::BlackholesConfig;
pub use contract::{BlackHole, NewBlackHole};
pub use domain::error::DomainError;
pub use domain::seed::SeedOutcome;
pub use module::BlackholesModule;
