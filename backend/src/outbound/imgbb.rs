//! Reqwest-backed imgbb image host adapter.
//!
//! Posts the API key and the file as multipart fields `key` and `image` to the
//! upload endpoint and reads `data.url` / `data.delete_url` from the JSON
//! reply. Transport errors are reported without the request URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::ExamImage;
use crate::domain::ports::{ImageFile, ImageHost, ImageHostError};

/// Public imgbb upload endpoint.
pub const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    data: UploadDataDto,
}

#[derive(Debug, Deserialize)]
struct UploadDataDto {
    url: String,
    #[serde(default)]
    delete_url: String,
}

/// [`ImageHost`] that stores images on imgbb.
pub struct ImgbbImageHost {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl ImgbbImageHost {
    /// Build an adapter for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbImageHost {
    async fn upload(&self, image: ImageFile) -> Result<ExamImage, ImageHostError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|error| ImageHostError::rejected(415_u16, error.to_string()))?;
        let form = Form::new()
            .text("key", self.api_key.clone())
            .part("image", part);
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).chars().take(200).collect::<String>();
            return Err(ImageHostError::rejected(status.as_u16(), message));
        }
        parse_upload(&body)
    }
}

fn transport_error(error: reqwest::Error) -> ImageHostError {
    ImageHostError::transport(error.without_url().to_string())
}

fn parse_upload(body: &[u8]) -> Result<ExamImage, ImageHostError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body)
        .map_err(|error| ImageHostError::invalid_response(error.to_string()))?;
    Ok(ExamImage::new(decoded.data.url, decoded.data.delete_url))
}
