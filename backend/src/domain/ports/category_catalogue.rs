//! Driving port for category reads and writes.

use async_trait::async_trait;

use crate::domain::{
    CategoryUpdate, Error, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};

/// Category use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCatalogue: Send + Sync {
    /// Major categories ordered by code.
    async fn list_major_types(&self, filter: TypeCodeFilter) -> Result<Vec<MajorType>, Error>;

    /// Minor categories ordered by code.
    async fn list_minor_types(&self, filter: TypeCodeFilter) -> Result<Vec<MinorType>, Error>;

    /// One major category; `not_found` when unknown.
    async fn get_major_type(&self, type_code: &str) -> Result<MajorType, Error>;

    /// Minor categories under a major; empty when there are none.
    async fn minor_types_of(&self, major_type_code: &str) -> Result<Vec<MinorType>, Error>;

    /// Create a major category; `conflict` when the code is taken.
    async fn create_major_type(&self, new: NewMajorType) -> Result<MajorType, Error>;

    /// Create a minor category.
    ///
    /// # Errors
    ///
    /// `not_found` when the parent is unknown (nothing is written),
    /// `conflict` when the code is taken.
    async fn create_minor_type(&self, new: NewMinorType) -> Result<MinorType, Error>;

    /// Rename a major category; `not_found` when unknown.
    async fn update_major_type(&self, type_code: &str, update: CategoryUpdate)
    -> Result<(), Error>;

    /// Rename a minor category; `not_found` when unknown.
    async fn update_minor_type(&self, type_code: &str, update: CategoryUpdate)
    -> Result<(), Error>;
}
