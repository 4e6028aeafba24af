pub mod entity;
pub mod lazy_repo;
pub mod migrations;
pub mod sea_orm_repo;

pub use lazy_repo::LazyBlackHolesRepository;
pub use sea_orm_repo::SeaOrmBlackHolesRepository;
