//! Reqwest-backed implementation of [`IdiomApi`].
//!
//! This adapter owns transport details only: URL construction, JSON and
//! multipart encoding, and mapping of HTTP failures into [`ClientError`].

use std::time::Duration;

use async_trait::async_trait;
use idiom_catalog::{ExamImage, Idiom, MajorType, MinorType};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{
    CategoryUpdate, IdiomApi, ImageUpload, NewMajorType, NewMinorType, TypeFilter, UpdateOutcome,
};
use crate::error::ClientError;

/// Client for a catalogue API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpIdiomApi {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct CreatedEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpIdiomApi {
    /// Build a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] when `base_url` cannot carry
    /// paths, or [`ClientError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::invalid_request(format!(
                "base URL '{base_url}' cannot carry paths"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::transport(error.to_string()))?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Root URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|error| ClientError::invalid_request(format!("invalid path '{path}': {error}")))
    }

    fn category_endpoint(&self, collection: &str, type_code: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_request("base URL cannot carry paths"))?
            .pop_if_empty()
            .push(type_code);
        Ok(url)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    Ok(body.to_vec())
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let body = send(request).await?;
    decode(&body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|error| ClientError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    debug!(%error, "catalogue request failed before a response arrived");
    ClientError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_owned());
    ClientError::status(status.as_u16(), message)
}

#[async_trait]
impl IdiomApi for HttpIdiomApi {
    async fn list_idioms(&self) -> Result<Vec<Idiom>, ClientError> {
        send_json(self.client.get(self.endpoint("idioms")?)).await
    }

    async fn get_idiom(&self, name: &str) -> Result<Idiom, ClientError> {
        let request = self
            .client
            .get(self.endpoint("idiom")?)
            .query(&[("idiom", name)]);
        send_json(request).await
    }

    async fn update_idiom(&self, idiom: &Idiom) -> Result<UpdateOutcome, ClientError> {
        send_json(self.client.post(self.endpoint("update-idiom")?).json(idiom)).await
    }

    async fn list_major_types(&self, filter: TypeFilter) -> Result<Vec<MajorType>, ClientError> {
        let request = self
            .client
            .get(self.endpoint("idiom_major_types")?)
            .query(&[("type_code", filter.as_query_value())]);
        send_json(request).await
    }

    async fn list_minor_types(&self, filter: TypeFilter) -> Result<Vec<MinorType>, ClientError> {
        let request = self
            .client
            .get(self.endpoint("idiom_minor_types")?)
            .query(&[("type_code", filter.as_query_value())]);
        send_json(request).await
    }

    async fn create_major_type(&self, request: &NewMajorType) -> Result<MajorType, ClientError> {
        let envelope: CreatedEnvelope<MajorType> =
            send_json(self.client.post(self.endpoint("major-types")?).json(request)).await?;
        Ok(envelope.data)
    }

    async fn create_minor_type(&self, request: &NewMinorType) -> Result<MinorType, ClientError> {
        let envelope: CreatedEnvelope<MinorType> =
            send_json(self.client.post(self.endpoint("minor-types")?).json(request)).await?;
        Ok(envelope.data)
    }

    async fn update_major_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<(), ClientError> {
        let url = self.category_endpoint("major-types", type_code)?;
        send(self.client.put(url).json(update)).await.map(|_| ())
    }

    async fn update_minor_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<(), ClientError> {
        let url = self.category_endpoint("minor-types", type_code)?;
        send(self.client.put(url).json(update)).await.map(|_| ())
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<ExamImage, ClientError> {
        let ImageUpload {
            idiom,
            file_name,
            content_type,
            bytes,
        } = upload;
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|error| ClientError::invalid_request(error.to_string()))?;
        let form = Form::new().text("idiom", idiom).part("image", part);
        send_json(self.client.post(self.endpoint("upload-image")?).multipart(form)).await
    }
}
