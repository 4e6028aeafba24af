pub mod error;
pub mod repo;
pub mod seed;
pub mod service;
