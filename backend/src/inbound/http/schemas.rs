//! OpenAPI schema definitions for the shared wire model.
//!
//! The entities in `idiom-catalog` are shared with clients that have no use
//! for utoipa, so they do not derive `ToSchema`. This module mirrors their
//! JSON shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ExamImage`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ExamImage)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ExamImageSchema {
    /// Public image URL.
    #[schema(example = "https://i.ibb.co/abc/horse.png")]
    url: String,
    /// Removal link issued by the image host; empty when none was issued.
    #[schema(example = "https://ibb.co/abc/delete")]
    delete_url: String,
}

/// OpenAPI schema for [`crate::domain::Idiom`].
///
/// On input the category fields also accept `majorTypeCode` and
/// `minorTypeCode`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Idiom)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdiomSchema {
    /// The idiom text; unique key.
    #[schema(example = "一马当先")]
    idiom: String,
    /// Explanation of the idiom.
    #[schema(example = "比喻工作走在群众前面，起带头作用。")]
    description: String,
    /// Example sentences in display order.
    examples: Vec<String>,
    /// Example images in display order.
    #[schema(rename = "examImages")]
    exam_images: Vec<ExamImageSchema>,
    /// Major category code; `null` when unclassified.
    #[schema(example = "DW")]
    major_type_code: Option<String>,
    /// Minor category code; `null` when unclassified.
    #[schema(example = "SUB_MA")]
    minor_type_code: Option<String>,
}

/// OpenAPI schema for [`crate::domain::MajorType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MajorType)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MajorTypeSchema {
    /// Unique category code.
    #[schema(example = "DW")]
    type_code: String,
    /// Display name.
    #[schema(example = "动物")]
    type_name: String,
    /// Optional description.
    description: Option<String>,
}

/// OpenAPI schema for [`crate::domain::MinorType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MinorType)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MinorTypeSchema {
    /// Unique category code.
    #[schema(example = "SUB_MA")]
    type_code: String,
    /// Code of the parent major category.
    #[schema(example = "DW")]
    major_type_code: String,
    /// Display name.
    #[schema(example = "马")]
    type_name: String,
    /// Optional description.
    description: Option<String>,
}
