//! In-process repositories used when no database is configured.
//!
//! Rows live behind a `tokio` read/write lock and vanish with the process.
//! The adapters honour the same ordering and uniqueness rules as the Diesel
//! repositories so that HTTP tests can run against them.

mod category_repository;
mod idiom_repository;

pub use category_repository::InMemoryCategoryRepository;
pub use idiom_repository::InMemoryIdiomRepository;
