//! Domain primitives, services and ports.
//!
//! Purpose: hold the catalogue's rules independent of HTTP and storage.
//! Entities are shared with clients through `idiom-catalog`; this module adds
//! key normalisation, validated commands, the error taxonomy and the services
//! implementing the driving ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`IdiomName`] / [`IdiomRecord`]: normalised idiom keys and rows.
//! - [`IdiomService`], [`CategoryService`], [`ImageUploadService`]: use-cases.
//! - [`CatalogueImport`]: bulk import planning and execution.

pub mod catalogue_import;
pub mod category;
mod category_service;
pub mod error;
pub mod idiom;
mod idiom_service;
mod image_upload_service;
pub mod ports;
mod trace_id;

pub use self::catalogue_import::{
    CatalogueImport, ImportAnalysis, ImportBundle, ImportReport, OrphanIdiom, OrphanMinorType,
};
pub use self::category::{
    CategoryUpdate, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::idiom::{
    ExamImage, Idiom, IdiomName, IdiomNameError, IdiomRecord, normalise_category_code,
};
pub use self::idiom_service::IdiomService;
pub use self::image_upload_service::ImageUploadService;
pub use self::trace_id::TraceId;
