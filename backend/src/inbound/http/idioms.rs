//! Idiom endpoints.
//!
//! ```text
//! GET  /idioms
//! GET  /idiom?idiom=<name>
//! POST /update-idiom
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, ExamImage, Idiom};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::IdiomSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text};

const IDIOM: FieldName = FieldName::new("idiom");

/// Query string of `GET /idiom`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdiomQuery {
    /// Idiom text to look up.
    #[param(example = "一马当先")]
    pub idiom: Option<String>,
}

/// Body of `POST /update-idiom`.
///
/// Every field except `idiom` may be omitted; omitted lists are stored
/// empty and omitted category codes are stored as `NULL`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpsertIdiomRequest {
    /// The idiom text; required.
    #[schema(example = "一马当先")]
    pub idiom: Option<String>,
    /// Explanation of the idiom.
    #[serde(default)]
    pub description: Option<String>,
    /// Example sentences.
    #[serde(default)]
    pub examples: Option<Vec<String>>,
    /// Example images.
    #[serde(default, rename = "examImages")]
    #[schema(value_type = Option<Vec<crate::inbound::http::schemas::ExamImageSchema>>)]
    pub exam_images: Option<Vec<ExamImage>>,
    /// Major category code.
    #[serde(default, alias = "majorTypeCode")]
    pub major_type_code: Option<String>,
    /// Minor category code.
    #[serde(default, alias = "minorTypeCode")]
    pub minor_type_code: Option<String>,
}

impl UpsertIdiomRequest {
    fn into_idiom(self) -> Result<Idiom, Error> {
        let idiom = require_text(self.idiom.as_deref(), IDIOM, "Idiom is required")?;
        Ok(Idiom {
            idiom,
            description: self.description.unwrap_or_default(),
            examples: self.examples.unwrap_or_default(),
            exam_images: self.exam_images.unwrap_or_default(),
            major_type_code: self.major_type_code,
            minor_type_code: self.minor_type_code,
        })
    }
}

/// Response of `POST /update-idiom`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpsertIdiomResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Whether the idiom was inserted or updated.
    #[schema(example = "成语已插入")]
    pub message: String,
}

/// List every idiom.
#[utoipa::path(
    get,
    path = "/idioms",
    description = "Return all idioms ordered by major category code, unclassified idioms last.",
    responses(
        (status = 200, description = "All idioms", body = Vec<IdiomSchema>),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["idioms"],
    operation_id = "listIdioms"
)]
#[get("/idioms")]
pub async fn list_idioms(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let idioms = state.idioms.list_idioms().await?;
    Ok(HttpResponse::Ok().json(idioms))
}

/// Fetch one idiom by its text.
#[utoipa::path(
    get,
    path = "/idiom",
    params(IdiomQuery),
    responses(
        (status = 200, description = "The idiom", body = IdiomSchema),
        (status = 400, description = "Missing idiom parameter", body = Error),
        (status = 404, description = "Idiom not found", body = Error)
    ),
    tags = ["idioms"],
    operation_id = "getIdiom"
)]
#[get("/idiom")]
pub async fn get_idiom(
    state: web::Data<HttpState>,
    query: web::Query<IdiomQuery>,
) -> ApiResult<HttpResponse> {
    let name = require_text(query.idiom.as_deref(), IDIOM, "Idiom parameter is required")?;
    let idiom = state.idioms.get_idiom(&name).await?;
    Ok(HttpResponse::Ok().json(idiom))
}

/// Insert an idiom or replace the stored one with the same text.
#[utoipa::path(
    post,
    path = "/update-idiom",
    request_body = UpsertIdiomRequest,
    responses(
        (status = 200, description = "Idiom inserted or updated", body = UpsertIdiomResponse),
        (status = 400, description = "Missing idiom text", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["idioms"],
    operation_id = "upsertIdiom"
)]
#[post("/update-idiom")]
pub async fn upsert_idiom(
    state: web::Data<HttpState>,
    payload: web::Json<UpsertIdiomRequest>,
) -> ApiResult<HttpResponse> {
    let idiom = payload.into_inner().into_idiom()?;
    let outcome = state.idioms.upsert_idiom(idiom).await?;
    Ok(HttpResponse::Ok().json(UpsertIdiomResponse {
        success: true,
        message: outcome.message().to_owned(),
    }))
}
