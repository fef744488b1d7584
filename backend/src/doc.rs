//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every catalogue, upload and health endpoint
//! - **Schemas**: the error payload plus wrappers from
//!   [`crate::inbound::http::schemas`] describing the shared wire model
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::categories::{
    CreateMajorTypeRequest, CreateMinorTypeRequest, UpdateTypeRequest, UpdatedResponse,
};
use crate::inbound::http::idioms::{UpsertIdiomRequest, UpsertIdiomResponse};
use crate::inbound::http::schemas::{
    ExamImageSchema, IdiomSchema, MajorTypeSchema, MinorTypeSchema,
};
use crate::inbound::http::uploads::UploadImageForm;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chengyu catalogue API",
        description = "Browse, categorise and annotate Chinese idioms.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::idioms::list_idioms,
        crate::inbound::http::idioms::get_idiom,
        crate::inbound::http::idioms::upsert_idiom,
        crate::inbound::http::categories::list_major_types,
        crate::inbound::http::categories::list_minor_types,
        crate::inbound::http::categories::create_major_type,
        crate::inbound::http::categories::get_major_type,
        crate::inbound::http::categories::update_major_type,
        crate::inbound::http::categories::minor_types_of_major,
        crate::inbound::http::categories::create_minor_type,
        crate::inbound::http::categories::update_minor_type,
        crate::inbound::http::uploads::upload_image,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        IdiomSchema,
        ExamImageSchema,
        MajorTypeSchema,
        MinorTypeSchema,
        UpsertIdiomRequest,
        UpsertIdiomResponse,
        CreateMajorTypeRequest,
        CreateMinorTypeRequest,
        UpdateTypeRequest,
        UpdatedResponse,
        UploadImageForm,
        Error,
        ErrorCode
    )),
    tags(
        (name = "idioms", description = "Idiom listing, lookup and upsert"),
        (name = "categories", description = "Major and minor category management"),
        (name = "uploads", description = "Example image uploads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const IDIOM_SCHEMA_NAME: &str = "crate.domain.Idiom";
    const ERROR_SCHEMA_NAME: &str = "Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    fn idiom_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let idiom_schema = schemas.get(IDIOM_SCHEMA_NAME).expect("Idiom schema");

        assert_object_schema_has_field(idiom_schema, "examImages");
        assert_object_schema_has_field(idiom_schema, "major_type_code");
    }

    #[rstest]
    #[case("/idioms")]
    #[case("/idiom")]
    #[case("/update-idiom")]
    #[case("/idiom_major_types")]
    #[case("/idiom_minor_types")]
    #[case("/major-types")]
    #[case("/major-types/{typeCode}")]
    #[case("/major-types/{typeCode}/minor-types")]
    #[case("/minor-types")]
    #[case("/minor-types/{typeCode}")]
    #[case("/upload-image")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
