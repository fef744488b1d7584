//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ImageHost`]) are implemented by outbound
//! adapters. Driving ports ([`IdiomCatalogue`], [`CategoryCatalogue`],
//! [`ImageUploads`]) are implemented by domain services and consumed by the
//! HTTP adapter and the import tool.

mod macros;
pub(crate) use macros::define_port_error;

mod category_catalogue;
mod category_repository;
mod idiom_catalogue;
mod idiom_repository;
mod image_host;
mod image_uploads;

#[cfg(test)]
pub use category_catalogue::MockCategoryCatalogue;
pub use category_catalogue::CategoryCatalogue;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use idiom_catalogue::MockIdiomCatalogue;
pub use idiom_catalogue::{IdiomCatalogue, UpsertOutcome};
#[cfg(test)]
pub use idiom_repository::MockIdiomRepository;
pub use idiom_repository::{IdiomRepository, IdiomRepositoryError};
#[cfg(test)]
pub use image_host::MockImageHost;
pub use image_host::{FixtureImageHost, ImageFile, ImageHost, ImageHostError, PLACEHOLDER_IMAGE_URL};
#[cfg(test)]
pub use image_uploads::MockImageUploads;
pub use image_uploads::ImageUploads;
