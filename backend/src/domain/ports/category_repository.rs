//! Driven port for major and minor category persistence.

use async_trait::async_trait;

use crate::domain::{
    CategoryUpdate, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repositories.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "category repository query failed: {message}",
        /// The type code is already taken.
        DuplicateCode { code: String } =>
            "type code already exists: {code}",
        /// The parent major category vanished between check and insert.
        MissingParent { code: String } =>
            "major type does not exist: {code}",
    }
}

/// Storage for the two-level category taxonomy.
///
/// List operations return rows ordered by `type_code`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Major categories passing `filter`.
    async fn list_major_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MajorType>, CategoryRepositoryError>;

    /// Minor categories passing `filter`.
    async fn list_minor_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError>;

    /// One major category by code.
    async fn find_major_type(
        &self,
        type_code: &str,
    ) -> Result<Option<MajorType>, CategoryRepositoryError>;

    /// Minor categories whose parent is `major_type_code`.
    async fn minor_types_of(
        &self,
        major_type_code: &str,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError>;

    /// Insert a major category.
    async fn insert_major_type(&self, new: &NewMajorType) -> Result<(), CategoryRepositoryError>;

    /// Insert a minor category.
    async fn insert_minor_type(&self, new: &NewMinorType) -> Result<(), CategoryRepositoryError>;

    /// Rename a major category; `false` when the code is unknown.
    async fn update_major_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError>;

    /// Rename a minor category; `false` when the code is unknown.
    async fn update_minor_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError>;
}
