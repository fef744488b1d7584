//! Image upload service: validates client files before forwarding them to
//! the configured [`ImageHost`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{ImageFile, ImageHost, ImageHostError, ImageUploads};
use crate::domain::{Error, ExamImage};

/// Upload service implementing the driving port.
#[derive(Clone)]
pub struct ImageUploadService<H> {
    host: Arc<H>,
}

impl<H> ImageUploadService<H> {
    /// Create a service forwarding to `host`.
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }
}

const IMAGE_HOST_UNAVAILABLE: &str = "Image host unavailable";

fn map_host_error(error: ImageHostError) -> Error {
    match error {
        ImageHostError::Transport { .. } => Error::service_unavailable(IMAGE_HOST_UNAVAILABLE),
        ImageHostError::Rejected { status, message } => {
            Error::internal(format!("image host rejected upload ({status}): {message}"))
        }
        ImageHostError::InvalidResponse { message } => {
            Error::internal(format!("image host response invalid: {message}"))
        }
    }
}

fn validate(image: &ImageFile) -> Result<(), Error> {
    if image.bytes.is_empty() {
        return Err(Error::invalid_request("Image file is empty"));
    }
    if !image.content_type.starts_with("image/") {
        return Err(Error::invalid_request(format!(
            "Unsupported content type: {}",
            image.content_type
        )));
    }
    Ok(())
}

#[async_trait]
impl<H> ImageUploads for ImageUploadService<H>
where
    H: ImageHost,
{
    async fn upload_image(
        &self,
        idiom: Option<String>,
        image: ImageFile,
    ) -> Result<ExamImage, Error> {
        validate(&image)?;
        let file_name = image.file_name.clone();
        let size = image.bytes.len();
        match self.host.upload(image).await {
            Ok(stored) => {
                info!(idiom = ?idiom, file_name, size, url = %stored.url, "image uploaded");
                Ok(stored)
            }
            Err(error) => {
                warn!(idiom = ?idiom, file_name, %error, "image upload failed");
                Err(map_host_error(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockImageHost;
    use rstest::rstest;

    fn png(bytes: Vec<u8>) -> ImageFile {
        ImageFile {
            file_name: "horse.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_valid_images() {
        let mut host = MockImageHost::new();
        host.expect_upload()
            .withf(|image| image.file_name == "horse.png")
            .return_once(|_| Ok(ExamImage::new("https://i.example/h.png", "https://i.example/del")));
        let service = ImageUploadService::new(Arc::new(host));
        let stored = service
            .upload_image(Some("一马当先".to_owned()), png(vec![1, 2, 3]))
            .await
            .expect("uploaded");
        assert_eq!(stored.delete_url, "https://i.example/del");
    }

    #[rstest]
    #[case(png(Vec::new()))]
    #[case(ImageFile { content_type: "text/plain".to_owned(), ..png(vec![1]) })]
    #[tokio::test]
    async fn rejects_invalid_files_before_forwarding(#[case] image: ImageFile) {
        let mut host = MockImageHost::new();
        host.expect_upload().never();
        let service = ImageUploadService::new(Arc::new(host));
        let error = service.upload_image(None, image).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(ImageHostError::transport("dns"), ErrorCode::ServiceUnavailable)]
    #[case(ImageHostError::rejected(400_u16, "bad key"), ErrorCode::InternalError)]
    #[case(ImageHostError::invalid_response("no data"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn host_failures_are_mapped(#[case] failure: ImageHostError, #[case] expected: ErrorCode) {
        let mut host = MockImageHost::new();
        host.expect_upload().return_once(move |_| Err(failure));
        let service = ImageUploadService::new(Arc::new(host));
        let error = service
            .upload_image(None, png(vec![1]))
            .await
            .expect_err("host failed");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn transport_detail_stays_out_of_the_client_message() {
        let mut host = MockImageHost::new();
        host.expect_upload()
            .return_once(|_| Err(ImageHostError::transport("connect to api.imgbb.com?key=k-1")));
        let service = ImageUploadService::new(Arc::new(host));
        let error = service
            .upload_image(None, png(vec![1]))
            .await
            .expect_err("host failed");
        assert_eq!(error.message(), "Image host unavailable");
    }
}
