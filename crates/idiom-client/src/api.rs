//! Port describing the catalogue API as seen from a client.

use async_trait::async_trait;
use idiom_catalog::{ExamImage, Idiom, MajorType, MinorType};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Category list filter understood by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Every category.
    #[default]
    All,
    /// Only the category with this code.
    Code(String),
}

impl TypeFilter {
    /// Value sent as the `type_code` query parameter.
    #[must_use]
    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Code(code) => code,
        }
    }
}

/// Body of a create-major-type request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMajorType {
    /// Code for the new category.
    pub type_code: String,
    /// Display name.
    pub type_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of a create-minor-type request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMinorType {
    /// Code for the new category.
    pub type_code: String,
    /// Code of the parent major category.
    pub major_type_code: String,
    /// Display name.
    pub type_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of a category update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUpdate {
    /// New display name.
    pub type_name: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
}

/// Acknowledgement returned by the idiom upsert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateOutcome {
    /// Whether the server applied the change.
    pub success: bool,
    /// Human-readable summary, e.g. whether the idiom was inserted.
    pub message: String,
}

/// An image file to upload for an idiom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Idiom the image illustrates.
    pub idiom: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// Operations the editor needs from the catalogue API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdiomApi: Send + Sync {
    /// Fetch every idiom.
    async fn list_idioms(&self) -> Result<Vec<Idiom>, ClientError>;

    /// Fetch one idiom by its text.
    async fn get_idiom(&self, name: &str) -> Result<Idiom, ClientError>;

    /// Insert or replace an idiom.
    async fn update_idiom(&self, idiom: &Idiom) -> Result<UpdateOutcome, ClientError>;

    /// List major categories.
    async fn list_major_types(&self, filter: TypeFilter) -> Result<Vec<MajorType>, ClientError>;

    /// List minor categories.
    async fn list_minor_types(&self, filter: TypeFilter) -> Result<Vec<MinorType>, ClientError>;

    /// Create a major category.
    async fn create_major_type(&self, request: &NewMajorType) -> Result<MajorType, ClientError>;

    /// Create a minor category.
    async fn create_minor_type(&self, request: &NewMinorType) -> Result<MinorType, ClientError>;

    /// Rename or re-describe a major category.
    async fn update_major_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<(), ClientError>;

    /// Rename or re-describe a minor category.
    async fn update_minor_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<(), ClientError>;

    /// Upload an example image and return its hosted location.
    async fn upload_image(&self, upload: ImageUpload) -> Result<ExamImage, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TypeFilter::All, "all")]
    #[case(TypeFilter::Code("DW".to_owned()), "DW")]
    fn filter_query_values(#[case] filter: TypeFilter, #[case] expected: &str) {
        assert_eq!(filter.as_query_value(), expected);
    }

    #[rstest]
    fn new_major_type_omits_missing_description() {
        let body = NewMajorType {
            type_code: "DW".to_owned(),
            type_name: "动物".to_owned(),
            description: None,
        };
        let value = serde_json::to_value(&body).expect("encodes");
        assert!(value.get("description").is_none());
        assert_eq!(value["type_code"], "DW");
    }
}
