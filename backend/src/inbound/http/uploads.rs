//! Image upload endpoint.
//!
//! ```text
//! POST /upload-image   multipart: image=<file>, idiom=<text, optional>
//! ```

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::ImageFile;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ExamImageSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// imgbb rejects files above 32 MiB.
pub const MAX_IMAGE_BYTES: usize = 32 * 1024 * 1024;

const IMAGE: FieldName = FieldName::new("image");
const DEFAULT_FILE_NAME: &str = "upload";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart form accepted by `POST /upload-image`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadImageForm {
    /// The image file.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// Idiom the image belongs to, for logging.
    idiom: Option<String>,
}

fn multipart_error(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("Malformed multipart body: {err}"))
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_error)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(Error::invalid_request(format!(
                "Image exceeds {limit} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

struct UploadForm {
    idiom: Option<String>,
    image: Option<ImageFile>,
}

async fn read_form(mut payload: Multipart) -> Result<UploadForm, Error> {
    let mut form = UploadForm {
        idiom: None,
        image: None,
    };
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(str::to_owned));
        match name.as_deref() {
            Some("image") => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(str::to_owned))
                    .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned());
                let content_type = field
                    .content_type()
                    .map_or_else(|| DEFAULT_CONTENT_TYPE.to_owned(), ToString::to_string);
                let bytes = read_field(&mut field, MAX_IMAGE_BYTES).await?;
                form.image = Some(ImageFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("idiom") => {
                let bytes = read_field(&mut field, 1024).await?;
                let text = String::from_utf8_lossy(&bytes).trim().to_owned();
                form.idiom = (!text.is_empty()).then_some(text);
            }
            _ => {
                read_field(&mut field, MAX_IMAGE_BYTES).await?;
            }
        }
    }
    Ok(form)
}

/// Upload an example image and return its hosted URLs.
#[utoipa::path(
    post,
    path = "/upload-image",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ExamImageSchema),
        (status = 400, description = "Missing, empty or non-image file", body = Error),
        (status = 503, description = "Image host unreachable", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadImage"
)]
#[post("/upload-image")]
pub async fn upload_image(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let form = read_form(payload).await?;
    let image = form
        .image
        .ok_or_else(|| missing_field_error(IMAGE, "Image file is required"))?;
    let stored = state.uploads.upload_image(form.idiom, image).await?;
    Ok(HttpResponse::Ok().json(stored))
}
