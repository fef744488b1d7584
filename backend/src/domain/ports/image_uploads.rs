//! Driving port for example-image uploads.

use async_trait::async_trait;

use crate::domain::{Error, ExamImage};

use super::ImageFile;

/// Upload use-case consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploads: Send + Sync {
    /// Validate and forward an image, optionally tagged with the idiom it
    /// illustrates.
    ///
    /// # Errors
    ///
    /// `invalid_request` for empty or non-image files,
    /// `service_unavailable` when the host cannot be reached.
    async fn upload_image(&self, idiom: Option<String>, image: ImageFile)
    -> Result<ExamImage, Error>;
}
