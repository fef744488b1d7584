//! Major and minor category endpoints.
//!
//! ```text
//! GET  /idiom_major_types?type_code=<code|all>
//! GET  /idiom_minor_types?type_code=<code|all>
//! POST /major-types
//! GET  /major-types/{typeCode}
//! PUT  /major-types/{typeCode}
//! GET  /major-types/{typeCode}/minor-types
//! POST /minor-types
//! PUT  /minor-types/{typeCode}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CategoryUpdate, Error, NewMajorType, NewMinorType, TypeCodeFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{MajorTypeSchema, MinorTypeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, optional_text, require_text};

const TYPE_CODE: FieldName = FieldName::new("type_code");
const TYPE_NAME: FieldName = FieldName::new("type_name");
const MAJOR_TYPE_CODE: FieldName = FieldName::new("major_type_code");

const MISSING_FIELDS: &str = "Missing required fields";
const MISSING_TYPE_NAME: &str = "Missing type_name";

/// Optional `type_code` filter of the list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TypeCodeQuery {
    /// A category code, or `all` for every category.
    #[param(example = "all")]
    pub type_code: Option<String>,
}

/// Body of `POST /major-types`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMajorTypeRequest {
    /// Unique code; required.
    #[schema(example = "DW")]
    pub type_code: Option<String>,
    /// Display name; required.
    #[schema(example = "动物")]
    pub type_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateMajorTypeRequest {
    fn into_command(self) -> Result<NewMajorType, Error> {
        Ok(NewMajorType {
            type_code: require_text(self.type_code.as_deref(), TYPE_CODE, MISSING_FIELDS)?,
            type_name: require_text(self.type_name.as_deref(), TYPE_NAME, MISSING_FIELDS)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

/// Body of `POST /minor-types`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMinorTypeRequest {
    /// Unique code; required.
    #[schema(example = "SUB_MA")]
    pub type_code: Option<String>,
    /// Parent major category code; required.
    #[schema(example = "DW")]
    pub major_type_code: Option<String>,
    /// Display name; required.
    #[schema(example = "马")]
    pub type_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateMinorTypeRequest {
    fn into_command(self) -> Result<NewMinorType, Error> {
        Ok(NewMinorType {
            type_code: require_text(self.type_code.as_deref(), TYPE_CODE, MISSING_FIELDS)?,
            major_type_code: require_text(
                self.major_type_code.as_deref(),
                MAJOR_TYPE_CODE,
                MISSING_FIELDS,
            )?,
            type_name: require_text(self.type_name.as_deref(), TYPE_NAME, MISSING_FIELDS)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

/// Body of the category update endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTypeRequest {
    /// New display name; required.
    #[schema(example = "走兽")]
    pub type_name: Option<String>,
    /// New description; omitted or blank clears it.
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateTypeRequest {
    fn into_update(self) -> Result<CategoryUpdate, Error> {
        Ok(CategoryUpdate {
            type_name: require_text(self.type_name.as_deref(), TYPE_NAME, MISSING_TYPE_NAME)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

/// Envelope returned by the create endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse<T> {
    /// Always `true` on success.
    pub success: bool,
    /// The stored category.
    pub data: T,
}

/// Envelope returned by the update endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Human-readable confirmation.
    #[schema(example = "Major type updated successfully")]
    pub message: String,
}

fn updated(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(UpdatedResponse {
        success: true,
        message: message.to_owned(),
    })
}

/// List major categories.
#[utoipa::path(
    get,
    path = "/idiom_major_types",
    params(TypeCodeQuery),
    responses(
        (status = 200, description = "Major categories ordered by code", body = Vec<MajorTypeSchema>),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listMajorTypes"
)]
#[get("/idiom_major_types")]
pub async fn list_major_types(
    state: web::Data<HttpState>,
    query: web::Query<TypeCodeQuery>,
) -> ApiResult<HttpResponse> {
    let filter = TypeCodeFilter::from_query(query.type_code.as_deref());
    let majors = state.categories.list_major_types(filter).await?;
    Ok(HttpResponse::Ok().json(majors))
}

/// List minor categories.
#[utoipa::path(
    get,
    path = "/idiom_minor_types",
    params(TypeCodeQuery),
    responses(
        (status = 200, description = "Minor categories ordered by code", body = Vec<MinorTypeSchema>),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listMinorTypes"
)]
#[get("/idiom_minor_types")]
pub async fn list_minor_types(
    state: web::Data<HttpState>,
    query: web::Query<TypeCodeQuery>,
) -> ApiResult<HttpResponse> {
    let filter = TypeCodeFilter::from_query(query.type_code.as_deref());
    let minors = state.categories.list_minor_types(filter).await?;
    Ok(HttpResponse::Ok().json(minors))
}

/// Create a major category.
#[utoipa::path(
    post,
    path = "/major-types",
    request_body = CreateMajorTypeRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse<MajorTypeSchema>),
        (status = 400, description = "Missing code or name", body = Error),
        (status = 409, description = "Code already exists", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createMajorType"
)]
#[post("/major-types")]
pub async fn create_major_type(
    state: web::Data<HttpState>,
    payload: web::Json<CreateMajorTypeRequest>,
) -> ApiResult<HttpResponse> {
    let command = payload.into_inner().into_command()?;
    let created = state.categories.create_major_type(command).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        success: true,
        data: created,
    }))
}

/// Fetch one major category.
#[utoipa::path(
    get,
    path = "/major-types/{typeCode}",
    params(("typeCode" = String, Path, description = "Major category code")),
    responses(
        (status = 200, description = "The major category", body = MajorTypeSchema),
        (status = 404, description = "Major type not found", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getMajorType"
)]
#[get("/major-types/{typeCode}")]
pub async fn get_major_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let major = state.categories.get_major_type(&path).await?;
    Ok(HttpResponse::Ok().json(major))
}

/// Rename a major category.
#[utoipa::path(
    put,
    path = "/major-types/{typeCode}",
    params(("typeCode" = String, Path, description = "Major category code")),
    request_body = UpdateTypeRequest,
    responses(
        (status = 200, description = "Updated", body = UpdatedResponse),
        (status = 400, description = "Missing type_name", body = Error),
        (status = 404, description = "Major type not found", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateMajorType"
)]
#[put("/major-types/{typeCode}")]
pub async fn update_major_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTypeRequest>,
) -> ApiResult<HttpResponse> {
    let update = payload.into_inner().into_update()?;
    state.categories.update_major_type(&path, update).await?;
    Ok(updated("Major type updated successfully"))
}

/// List the minor categories of one major category.
#[utoipa::path(
    get,
    path = "/major-types/{typeCode}/minor-types",
    params(("typeCode" = String, Path, description = "Major category code")),
    responses(
        (status = 200, description = "Minor categories; empty when none", body = Vec<MinorTypeSchema>)
    ),
    tags = ["categories"],
    operation_id = "listMinorTypesOfMajor"
)]
#[get("/major-types/{typeCode}/minor-types")]
pub async fn minor_types_of_major(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let minors = state.categories.minor_types_of(&path).await?;
    Ok(HttpResponse::Ok().json(minors))
}

/// Create a minor category under an existing major category.
#[utoipa::path(
    post,
    path = "/minor-types",
    request_body = CreateMinorTypeRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse<MinorTypeSchema>),
        (status = 400, description = "Missing fields", body = Error),
        (status = 404, description = "Major type does not exist", body = Error),
        (status = 409, description = "Code already exists", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createMinorType"
)]
#[post("/minor-types")]
pub async fn create_minor_type(
    state: web::Data<HttpState>,
    payload: web::Json<CreateMinorTypeRequest>,
) -> ApiResult<HttpResponse> {
    let command = payload.into_inner().into_command()?;
    let created = state.categories.create_minor_type(command).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        success: true,
        data: created,
    }))
}

/// Rename a minor category.
#[utoipa::path(
    put,
    path = "/minor-types/{typeCode}",
    params(("typeCode" = String, Path, description = "Minor category code")),
    request_body = UpdateTypeRequest,
    responses(
        (status = 200, description = "Updated", body = UpdatedResponse),
        (status = 400, description = "Missing type_name", body = Error),
        (status = 404, description = "Minor type not found", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateMinorType"
)]
#[put("/minor-types/{typeCode}")]
pub async fn update_minor_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTypeRequest>,
) -> ApiResult<HttpResponse> {
    let update = payload.into_inner().into_update()?;
    state.categories.update_minor_type(&path, update).await?;
    Ok(updated("Minor type updated successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCategoryCatalogue, MockIdiomCatalogue, MockImageUploads};
    use crate::domain::{ErrorCode, MajorType, MinorType};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state(categories: MockCategoryCatalogue) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockIdiomCatalogue::new()),
            Arc::new(categories),
            Arc::new(MockImageUploads::new()),
        ))
    }

    #[rstest]
    #[case("/idiom_major_types", TypeCodeFilter::All)]
    #[case("/idiom_major_types?type_code=all", TypeCodeFilter::All)]
    #[case("/idiom_major_types?type_code=DW", TypeCodeFilter::Code("DW".to_owned()))]
    #[actix_web::test]
    async fn list_interprets_filter(#[case] uri: &str, #[case] expected: TypeCodeFilter) {
        let mut categories = MockCategoryCatalogue::new();
        categories
            .expect_list_major_types()
            .withf(move |filter| *filter == expected)
            .return_once(|_| Ok(Vec::new()));
        let app =
            test::init_service(App::new().app_data(state(categories)).service(list_major_types))
                .await;

        let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_major_returns_created_envelope() {
        let mut categories = MockCategoryCatalogue::new();
        categories
            .expect_create_major_type()
            .withf(|new| new.type_code == "DW" && new.description.is_none())
            .return_once(|new| Ok(new.to_entity()));
        let app =
            test::init_service(App::new().app_data(state(categories)).service(create_major_type))
                .await;

        let request = test::TestRequest::post()
            .uri("/major-types")
            .set_json(json!({"type_code": " DW ", "type_name": "动物", "description": ""}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: CreatedResponse<MajorType> = test::read_body_json(response).await;
        assert!(body.success);
        assert_eq!(body.data.type_name, "动物");
    }

    #[rstest]
    #[case(json!({"type_name": "动物"}), "type_code")]
    #[case(json!({"type_code": "DW"}), "type_name")]
    #[actix_web::test]
    async fn create_major_requires_code_and_name(#[case] payload: Value, #[case] field: &str) {
        let mut categories = MockCategoryCatalogue::new();
        categories.expect_create_major_type().never();
        let app =
            test::init_service(App::new().app_data(state(categories)).service(create_major_type))
                .await;

        let request = test::TestRequest::post()
            .uri("/major-types")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Error = test::read_body_json(response).await;
        assert_eq!(
            body.details(),
            Some(&json!({"field": field, "code": "missing_field"}))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn create_minor_with_unknown_parent_is_not_found() {
        let mut categories = MockCategoryCatalogue::new();
        categories
            .expect_create_minor_type()
            .return_once(|_| Err(Error::not_found("Major type does not exist")));
        let app =
            test::init_service(App::new().app_data(state(categories)).service(create_minor_type))
                .await;

        let request = test::TestRequest::post()
            .uri("/minor-types")
            .set_json(json!({"type_code": "SUB_YU", "major_type_code": "SW", "type_name": "鱼"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Error = test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_reports_success_message() {
        let mut categories = MockCategoryCatalogue::new();
        categories
            .expect_update_minor_type()
            .withf(|code, update| code == "SUB_MA" && update.type_name == "骏马")
            .return_once(|_, _| Ok(()));
        let app =
            test::init_service(App::new().app_data(state(categories)).service(update_minor_type))
                .await;

        let request = test::TestRequest::put()
            .uri("/minor-types/SUB_MA")
            .set_json(json!({"type_name": "骏马"}))
            .to_request();
        let body: UpdatedResponse = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.message, "Minor type updated successfully");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_requires_type_name() {
        let mut categories = MockCategoryCatalogue::new();
        categories.expect_update_major_type().never();
        let app =
            test::init_service(App::new().app_data(state(categories)).service(update_major_type))
                .await;

        let request = test::TestRequest::put()
            .uri("/major-types/DW")
            .set_json(json!({"description": "x"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Error = test::read_body_json(response).await;
        assert_eq!(body.message(), "Missing type_name");
    }

    #[rstest]
    #[actix_web::test]
    async fn minor_types_of_major_lists_children() {
        let mut categories = MockCategoryCatalogue::new();
        categories
            .expect_minor_types_of()
            .withf(|code| code == "DW")
            .return_once(|_| {
                Ok(vec![MinorType {
                    type_code: "SUB_MA".to_owned(),
                    major_type_code: "DW".to_owned(),
                    type_name: "马".to_owned(),
                    description: None,
                }])
            });
        let app = test::init_service(
            App::new()
                .app_data(state(categories))
                .service(minor_types_of_major),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/major-types/DW/minor-types")
            .to_request();
        let body: Vec<MinorType> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.len(), 1);
    }
}
