//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations for the idiom and category ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Upsert and parent rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto the port error
//!   enums; unique and foreign-key violations become domain variants.
//!
//! # Example
//!
//! ```no_run
//! use chengyu_backend::outbound::persistence::{
//!     DbPool, DieselIdiomRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/chengyu";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _idioms = DieselIdiomRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_category_repository;
mod diesel_idiom_repository;
mod error_mapping;
mod json_columns;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_idiom_repository::DieselIdiomRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
