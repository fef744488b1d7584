//! Driven port for idiom persistence.

use async_trait::async_trait;

use crate::domain::{Idiom, IdiomName, IdiomRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by idiom repositories.
    pub enum IdiomRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "idiom repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "idiom repository query failed: {message}",
        /// A JSON list column could not be encoded or decoded.
        Serialization { message: String } =>
            "idiom column encoding failed: {message}",
        /// An insert raced with another writer for the same key.
        Duplicate { name: String } =>
            "idiom already exists: {name}",
    }
}

/// Storage for idioms keyed by their normalised text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdiomRepository: Send + Sync {
    /// Every idiom ordered by major category code (unclassified last), then
    /// by idiom text. A missing image list decodes to an empty vector.
    async fn list_all(&self) -> Result<Vec<Idiom>, IdiomRepositoryError>;

    /// Exact-match lookup on the key.
    async fn find_by_name(&self, name: &IdiomName) -> Result<Option<Idiom>, IdiomRepositoryError>;

    /// Whether a row exists for the key.
    async fn exists(&self, name: &IdiomName) -> Result<bool, IdiomRepositoryError>;

    /// Insert a new row.
    ///
    /// Fails with [`IdiomRepositoryError::Duplicate`] when the key exists.
    async fn insert(&self, record: &IdiomRecord) -> Result<(), IdiomRepositoryError>;

    /// Replace every field of an existing row.
    ///
    /// Returns `false` when no row matched the key.
    async fn update(&self, record: &IdiomRecord) -> Result<bool, IdiomRepositoryError>;
}
