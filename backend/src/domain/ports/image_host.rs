//! Driven port for third-party image hosting.

use async_trait::async_trait;

use crate::domain::ExamImage;

use super::define_port_error;

/// URL returned by [`FixtureImageHost`] for every upload.
pub const PLACEHOLDER_IMAGE_URL: &str = "image_url_here";

define_port_error! {
    /// Errors raised by image hosts.
    pub enum ImageHostError {
        /// The host could not be reached.
        Transport { message: String } =>
            "image host unreachable: {message}",
        /// The host refused the upload.
        Rejected { status: u16, message: String } =>
            "image host rejected the upload with {status}: {message}",
        /// The host answered with an unexpected body.
        InvalidResponse { message: String } =>
            "image host returned an invalid response: {message}",
    }
}

/// An image received from a client, ready to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, or a generated one when the client sent none.
    pub file_name: String,
    /// MIME type declared by the client.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// Stores an image and returns where it can be fetched and removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload `image` and return its public and removal URLs.
    async fn upload(&self, image: ImageFile) -> Result<ExamImage, ImageHostError>;
}

/// Stub host used when no image service is configured.
///
/// Accepts every image and returns [`PLACEHOLDER_IMAGE_URL`] with an empty
/// removal link.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureImageHost;

#[async_trait]
impl ImageHost for FixtureImageHost {
    async fn upload(&self, _image: ImageFile) -> Result<ExamImage, ImageHostError> {
        Ok(ExamImage::new(PLACEHOLDER_IMAGE_URL, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_host_returns_placeholder() {
        let image = ImageFile {
            file_name: "a.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let stored = FixtureImageHost.upload(image).await.expect("stub accepts");
        assert_eq!(stored, ExamImage::new(PLACEHOLDER_IMAGE_URL, ""));
    }
}
